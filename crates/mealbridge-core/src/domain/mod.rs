//! Domain entities - the core business objects.

mod food_post;
mod food_request;
mod user;

pub use food_post::{FoodPost, FoodStatus, NewFoodPost};
pub use food_request::{FoodRequest, NewFoodRequest, RequestStatus, Urgency};
pub use user::{User, UserType};
