pub use super::board::Entity as Board;
pub use super::board_invitation::Entity as BoardInvitation;
pub use super::board_member::Entity as BoardMember;
pub use super::notification::Entity as Notification;
pub use super::user::Entity as User;
