/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 以下に pub で列挙するものは、./mod.rs 経由で全て公開されるため注意
 */
use super::core::{ResourceId, ResourceTag};
use crate::messages;

// accommodations
pub enum AccommodationTag {}

impl ResourceTag for AccommodationTag {
    const PARAM: &'static str = "accommodationId";
    const INVALID: &'static str = messages::INVALID_ACCOMMODATION_ID;
}

pub type AccommodationId = ResourceId<AccommodationTag>;
