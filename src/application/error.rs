#[derive(Debug)]
pub enum ApplicationError {
    InternalError(String),
    DatabaseError(String),
    BadRequest(String),
    PayloadTooLarge,
}
