#[allow(unused_imports)]
pub mod prelude {
    pub use super::food_photo::Entity as FoodPhoto;
    pub use super::food_review::Entity as FoodReview;
    pub use super::note::Entity as Note;
    pub use super::photo::Entity as Photo;
    pub use super::pokemon_review::Entity as PokemonReview;
    pub use super::session::Entity as Session;
    pub use super::todo::Entity as Todo;
    pub use super::user::Entity as User;
}

pub mod food_photo;
pub mod food_review;
pub mod note;
pub mod photo;
pub mod pokemon_review;
pub mod session;
pub mod todo;
pub mod user;
