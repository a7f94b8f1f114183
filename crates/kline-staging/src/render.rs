//! Declarative rendering of the staging list into row descriptors.
//!
//! The presentation layer draws exactly what [`render`] returns and
//! nothing else, so identical lists always produce identical output.

use serde::Serialize;

use crate::list::StagingList;
use crate::types::MIB;

/// Names longer than this many characters get a tooltip with the full
/// name, since the row may truncate them.
pub const TITLE_THRESHOLD_CHARS: usize = 30;

/// Format a byte count as mebibytes with two decimals, e.g. `"5.00 MB"`.
#[must_use]
#[allow(clippy::cast_precision_loss)] // display only; sizes are far below 2^52
pub fn format_mib(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB as f64)
}

/// Identifies the row a remove control belongs to.
///
/// The index is only meaningful against the list it was rendered from.
/// Tokens are stamped with the list revision at render time, so the
/// controller can refuse a token once the list has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RemoveToken {
    index: usize,
    revision: u64,
}

impl RemoveToken {
    /// Position of the row in the rendered list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// List revision the token was rendered at.
    #[must_use]
    pub const fn revision(self) -> u64 {
        self.revision
    }
}

/// One visible row of the staging list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDescriptor {
    /// Position in the list, counted from zero.
    pub index: usize,
    /// File name as shown.
    pub name: String,
    /// Size in MiB, two decimals.
    pub size_label: String,
    /// Full name for a tooltip when the name is long.
    pub title: Option<String>,
    /// Token carried by the row's remove control.
    pub remove: RemoveToken,
}

/// The full visible state of the staging list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedList {
    /// Whether the list container is shown at all.
    pub visible: bool,
    /// One row per staged file, in list order.
    pub rows: Vec<RowDescriptor>,
}

/// Build the visible representation of `list` from scratch.
///
/// `revision` identifies the current list contents and is stamped into
/// every row's [`RemoveToken`].
#[must_use]
pub fn render<H>(list: &StagingList<H>, revision: u64) -> RenderedList {
    let rows: Vec<RowDescriptor> = list
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let name = file.name().to_owned();
            let title = (name.chars().count() > TITLE_THRESHOLD_CHARS).then(|| name.clone());
            RowDescriptor {
                index,
                size_label: format_mib(file.size()),
                title,
                name,
                remove: RemoveToken { index, revision },
            }
        })
        .collect();

    RenderedList {
        visible: !rows.is_empty(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileMeta, StagedFile};

    fn list_of(entries: &[(&str, u64)]) -> StagingList<()> {
        let mut list = StagingList::new();
        for &(name, size) in entries {
            list.push(StagedFile::new(FileMeta::new(name, size, "image/png"), ()));
        }
        list
    }

    #[test]
    fn format_mib_uses_two_decimals() {
        assert_eq!(format_mib(0), "0.00 MB");
        assert_eq!(format_mib(5 * MIB), "5.00 MB");
        assert_eq!(format_mib(MIB / 2), "0.50 MB");
        assert_eq!(format_mib(1_500_000), "1.43 MB");
    }

    #[test]
    fn empty_list_is_hidden() {
        let rendered = render(&StagingList::<()>::new(), 0);
        assert!(!rendered.visible);
        assert!(rendered.rows.is_empty());
    }

    #[test]
    fn rows_follow_list_order() {
        let rendered = render(&list_of(&[("a.png", MIB), ("b.png", 2 * MIB)]), 4);
        assert!(rendered.visible);
        let names: Vec<_> = rendered.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png"]);
        assert_eq!(rendered.rows[1].size_label, "2.00 MB");
        assert_eq!(rendered.rows[1].remove.index(), 1);
        assert_eq!(rendered.rows[1].remove.revision(), 4);
    }

    #[test]
    fn render_is_idempotent() {
        let list = list_of(&[("a.png", 1), ("b.png", 2), ("c.png", 3)]);
        assert_eq!(render(&list, 3), render(&list, 3));
    }

    #[test]
    fn long_names_get_a_title() {
        let long = "btcusdt-4h-2024-06-01-with-volume-profile.png";
        let rendered = render(&list_of(&[("short.png", 1), (long, 1)]), 0);
        assert_eq!(rendered.rows[0].title, None);
        assert_eq!(rendered.rows[1].title.as_deref(), Some(long));
    }
}
