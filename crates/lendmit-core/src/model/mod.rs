// ── Domain model ──

pub mod category;
pub mod identity;
pub mod resource;

pub use category::Category;
pub use identity::Identity;
pub use resource::Resource;
