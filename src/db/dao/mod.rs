pub mod account_dao;
pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod food_photo_dao;
pub mod food_review_dao;
pub mod note_dao;
pub mod photo_dao;
pub mod pokemon_review_dao;
pub mod session_dao;
pub mod todo_dao;
pub mod user_dao;

pub use account_dao::AccountDao;
pub use base::DaoBase;
pub use base_traits::{
    BaseColumns, HasIdActiveModel, OwnedActiveModel, OwnedEntity, TimestampedActiveModel,
};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use food_photo_dao::FoodPhotoDao;
pub use food_review_dao::FoodReviewDao;
pub use note_dao::NoteDao;
pub use photo_dao::PhotoDao;
pub use pokemon_review_dao::PokemonReviewDao;
pub use session_dao::SessionDao;
pub use todo_dao::TodoDao;
pub use user_dao::UserDao;
