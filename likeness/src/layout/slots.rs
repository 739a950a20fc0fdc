use crate::scene::payload::Finding;

/// Column a card is placed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Left column; connectors route along the left rail.
    Left,
    /// Right column; connectors route along the right rail.
    Right,
    /// Full-width summary block below the rows.
    Bottom,
}

/// Closed set of regions the report tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    /// 眉毛
    Eyebrows,
    /// 鼻子
    Nose,
    /// 脸型
    FaceShape,
    /// 眼睛
    Eyes,
    /// 嘴巴
    Mouth,
    /// 头型
    HeadShape,
    /// 总结
    Summary,
}

impl SlotCategory {
    /// Left column, top to bottom.
    pub const LEFT: [SlotCategory; 3] = [Self::Eyebrows, Self::Nose, Self::FaceShape];
    /// Right column, top to bottom.
    pub const RIGHT: [SlotCategory; 3] = [Self::Eyes, Self::Mouth, Self::HeadShape];
    /// Bottom block.
    pub const BOTTOM: [SlotCategory; 1] = [Self::Summary];

    /// Lower-case keywords matched against a finding's part name.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Eyebrows => &["眉毛", "eyebrow"],
            Self::Nose => &["鼻子", "nose"],
            Self::FaceShape => &["脸型", "face shape", "face-shape", "face_shape"],
            Self::Eyes => &["眼睛", "eyes"],
            Self::Mouth => &["嘴巴", "mouth"],
            Self::HeadShape => &["头型", "head shape", "head-shape", "head_shape"],
            Self::Summary => &["总结", "summary"],
        }
    }

    /// Column this category is placed in.
    pub fn placement(self) -> Placement {
        match self {
            Self::Eyebrows | Self::Nose | Self::FaceShape => Placement::Left,
            Self::Eyes | Self::Mouth | Self::HeadShape => Placement::Right,
            Self::Summary => Placement::Bottom,
        }
    }

    /// Return `true` when `part` names this category.
    pub fn matches(self, part: &str) -> bool {
        let part = part.to_lowercase();
        self.keywords().iter().any(|k| part.contains(k))
    }
}

/// A finding tagged with the slot it occupies.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LayoutSlot<'a> {
    /// Source finding.
    pub finding: &'a Finding,
    /// Matched category.
    pub category: SlotCategory,
    /// Column.
    pub placement: Placement,
}

/// Findings mapped onto the fixed slot tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlotAssignment<'a> {
    /// Left column in slot order.
    pub left: Vec<LayoutSlot<'a>>,
    /// Right column in slot order.
    pub right: Vec<LayoutSlot<'a>>,
    /// Summary block, if any finding matched it.
    pub bottom: Option<LayoutSlot<'a>>,
}

impl<'a> SlotAssignment<'a> {
    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len() + usize::from(self.bottom.is_some())
    }

    /// Return `true` when no finding matched any slot.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of card rows (the longer of the two columns).
    pub fn row_count(&self) -> usize {
        self.left.len().max(self.right.len())
    }

    /// Slots in drawing order: left column, right column, summary.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutSlot<'a>> {
        self.left
            .iter()
            .chain(self.right.iter())
            .chain(self.bottom.iter())
    }
}

/// Map unordered findings onto the fixed slots.
///
/// Each category takes the first finding whose part contains one of its keywords. Categories
/// without a match are skipped without leaving a gap, and findings matching no category are
/// dropped.
pub fn assign_slots(findings: &[Finding]) -> SlotAssignment<'_> {
    let pick = |category: SlotCategory| {
        findings
            .iter()
            .find(|f| category.matches(&f.part))
            .map(|finding| LayoutSlot {
                finding,
                category,
                placement: category.placement(),
            })
    };

    let out = SlotAssignment {
        left: SlotCategory::LEFT.into_iter().filter_map(pick).collect(),
        right: SlotCategory::RIGHT.into_iter().filter_map(pick).collect(),
        bottom: SlotCategory::BOTTOM.into_iter().find_map(pick),
    };

    for f in findings {
        if !out.iter().any(|s| std::ptr::eq(s.finding, f)) {
            tracing::debug!(part = %f.part, "finding matches no slot; skipped");
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/slots.rs"]
mod tests;
