pub use super::comment::Entity as Comment;
pub use super::comment_like::Entity as CommentLike;
pub use super::content::Entity as Content;
pub use super::course::Entity as Course;
pub use super::enrollment::Entity as Enrollment;
pub use super::enrollment_module::Entity as EnrollmentModule;
pub use super::module::Entity as Module;
pub use super::payment::Entity as Payment;
pub use super::user::Entity as User;
