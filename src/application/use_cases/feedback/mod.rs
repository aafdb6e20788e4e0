pub mod manage_feedback;
