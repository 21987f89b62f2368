use sea_orm::{EntityTrait, entity::prelude::DateTimeWithTimeZone};
use uuid::Uuid;

pub trait BaseColumns: EntityTrait {
    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
}

/// Entities whose rows belong to exactly one user.
pub trait OwnedEntity: EntityTrait {
    fn owner_column() -> Self::Column;
}

pub trait HasIdActiveModel {
    fn set_id(&mut self, id: Uuid);
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: DateTimeWithTimeZone);
}

pub trait OwnedActiveModel {
    fn set_owner(&mut self, owner: Uuid);
}
