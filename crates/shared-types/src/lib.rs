pub mod alert;
pub mod notice;

pub use alert::{Alert, Priority, RecipientRole, WindowTag};
pub use notice::{NoticeRecord, NoticeStatus, NoticeType, ParseStatusError};
