pub mod router;
pub mod scholarships;
pub mod universities;

pub use router::{ChatSession, ConversationRouter};
pub use scholarships::{RssFeedSource, ScholarshipItem, ScholarshipSource};
pub use universities::{HipolabsDirectory, UniversityDirectory, UniversityRecord};
