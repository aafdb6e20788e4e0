use crate::domain::customers::customer::ROLE_ADMIN;

/// Authenticated caller, built by the presentation layer from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub customer_id: i32,
    pub role: String,
}

impl Actor {
    pub fn new(customer_id: i32, role: impl Into<String>) -> Self {
        Self {
            customer_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("administrator privileges required")]
    AdminRequired,
    #[error("resource belongs to another customer")]
    NotOwner,
}

pub fn require_admin(actor: &Actor) -> Result<(), AccessError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AccessError::AdminRequired)
    }
}

pub fn require_owner_or_admin(actor: &Actor, owner_id: i32) -> Result<(), AccessError> {
    if actor.is_admin() || actor.customer_id == owner_id {
        Ok(())
    } else {
        Err(AccessError::NotOwner)
    }
}

/// Customer filter for list endpoints: admins see every row, customers their own.
pub fn listing_scope(actor: &Actor) -> Option<i32> {
    if actor.is_admin() {
        None
    } else {
        Some(actor.customer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_passes_every_check() {
        let admin = Actor::new(1, "admin");
        assert_eq!(require_admin(&admin), Ok(()));
        assert_eq!(require_owner_or_admin(&admin, 99), Ok(()));
        assert_eq!(listing_scope(&admin), None);
    }

    #[test]
    fn customer_is_limited_to_own_rows() {
        let customer = Actor::new(7, "customer");
        assert_eq!(require_admin(&customer), Err(AccessError::AdminRequired));
        assert_eq!(require_owner_or_admin(&customer, 7), Ok(()));
        assert_eq!(
            require_owner_or_admin(&customer, 8),
            Err(AccessError::NotOwner)
        );
        assert_eq!(listing_scope(&customer), Some(7));
    }
}
