/// Membership of a customer in a company. The pair is the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerCompany {
    pub id_customer: i32,
    pub id_company: i32,
}
