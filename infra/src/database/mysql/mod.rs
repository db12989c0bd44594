//! MySQL repository implementations

mod todo_repository_impl;
mod user_repository_impl;
mod verification_code_repository_impl;

pub use todo_repository_impl::MySqlTodoRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;
