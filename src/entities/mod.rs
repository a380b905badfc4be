pub mod comment;
pub mod tag;
pub mod video;

pub use crate::entities::comment::{Comment, CommentId, NewComment};
pub use crate::entities::tag::{Tag, TagSet};
pub use crate::entities::video::{PageData, VideoId};
