pub mod content;
pub mod patch;
pub mod project;
pub mod user;
pub mod video;

pub use content::Content;
pub use patch::Patch;
pub use project::{NewProject, Project, ProjectPatch};
pub use user::User;
pub use video::{NewVideo, Video, VideoPatch};
