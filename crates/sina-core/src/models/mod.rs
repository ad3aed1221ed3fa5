pub mod medication;
pub mod patient;
pub mod record;
pub mod scale;
