//! ID prefixes for every stored entity.
//!
//! IDs are generated by `pdh-db` as `{prefix}-{16 hex chars}`.

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_CSD_ITEM: &str = "csd";
pub const PREFIX_PERSONA: &str = "per";
pub const PREFIX_PERSONA_DETAIL: &str = "pdt";
pub const PREFIX_VISION_BOARD: &str = "pvb";
pub const PREFIX_MODEL_CANVAS: &str = "bmc";
pub const PREFIX_CANVAS_ITEM: &str = "bmi";
pub const PREFIX_RICE_ITEM: &str = "rce";
pub const PREFIX_ROADMAP_ITEM: &str = "rmp";
pub const PREFIX_OBJECTIVE: &str = "obj";
pub const PREFIX_KEY_RESULT: &str = "krs";
pub const PREFIX_LINK: &str = "lnk";

/// All prefixes, for uniqueness checks.
pub const ALL_PREFIXES: [&str; 12] = [
    PREFIX_PROJECT,
    PREFIX_CSD_ITEM,
    PREFIX_PERSONA,
    PREFIX_PERSONA_DETAIL,
    PREFIX_VISION_BOARD,
    PREFIX_MODEL_CANVAS,
    PREFIX_CANVAS_ITEM,
    PREFIX_RICE_ITEM,
    PREFIX_ROADMAP_ITEM,
    PREFIX_OBJECTIVE,
    PREFIX_KEY_RESULT,
    PREFIX_LINK,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn prefixes_are_unique_and_three_chars() {
        let unique: HashSet<&str> = ALL_PREFIXES.iter().copied().collect();
        assert_eq!(unique.len(), ALL_PREFIXES.len());
        assert!(ALL_PREFIXES.iter().all(|p| p.len() == 3));
    }
}
