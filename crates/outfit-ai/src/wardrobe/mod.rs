//! Wardrobe value types shared by the recommendation core and its storage seams.

pub mod domain;

pub use domain::{
    Category, ClothingItem, ItemId, Occasion, ProfileValidationError, Season, UserId,
    UserProfile, Weather,
};
