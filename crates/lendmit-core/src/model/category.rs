// ── Listing categories ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The fixed vocabulary offered when listing an item.
///
/// The server stores categories as free text, so `Resource.category`
/// stays a `String`; this enum is for validation and display.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Academics,
    Technology,
    #[strum(serialize = "Home & Dorm")]
    #[serde(rename = "Home & Dorm")]
    HomeAndDorm,
    #[strum(serialize = "Tools & Equipment")]
    #[serde(rename = "Tools & Equipment")]
    ToolsAndEquipment,
    #[strum(serialize = "Sports & Outdoors")]
    #[serde(rename = "Sports & Outdoors")]
    SportsAndOutdoors,
    #[strum(serialize = "Arts & Music")]
    #[serde(rename = "Arts & Music")]
    ArtsAndMusic,
    #[strum(serialize = "Games & Hobbies")]
    #[serde(rename = "Games & Hobbies")]
    GamesAndHobbies,
    #[strum(serialize = "Clothing & Costumes")]
    #[serde(rename = "Clothing & Costumes")]
    ClothingAndCostumes,
    #[strum(serialize = "Books & Media")]
    #[serde(rename = "Books & Media")]
    BooksAndMedia,
    Miscellaneous,
}
