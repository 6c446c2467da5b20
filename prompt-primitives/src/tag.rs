//! Style tags and the user's selection.

use serde::{Deserialize, Serialize};

use crate::TagId;

/// One stylistic modifier the user may add to bias generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagOption {
    id: TagId,
    label: String,
    value: String,
    category: String,
}

impl TagOption {
    /// Creates a tag option.
    #[must_use]
    pub fn new(
        id: TagId,
        label: impl Into<String>,
        value: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            value: value.into(),
            category: category.into(),
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> &TagId {
        &self.id
    }

    /// Returns the display text (e.g. `侧逆光`).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the prompt keyword (e.g. `rim lighting`).
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the grouping key.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Tags sharing one category, in first-seen order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCategory {
    /// Category name.
    pub name: String,
    /// Tags in the order they were suggested.
    pub tags: Vec<TagOption>,
}

/// Groups tags by category, keeping the order categories first appear in.
#[must_use]
pub fn group_by_category(tags: &[TagOption]) -> Vec<TagCategory> {
    let mut groups: Vec<TagCategory> = Vec::new();
    for tag in tags {
        match groups.iter_mut().find(|group| group.name == tag.category) {
            Some(group) => group.tags.push(tag.clone()),
            None => groups.push(TagCategory {
                name: tag.category.clone(),
                tags: vec![tag.clone()],
            }),
        }
    }
    groups
}

/// Ordered set of selected tags, unique by [`TagId`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedTags(Vec<TagOption>);

impl SelectedTags {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Removes the tag if a tag with the same id is selected, otherwise
    /// appends it. Returns `true` when the tag is selected afterwards.
    pub fn toggle(&mut self, tag: &TagOption) -> bool {
        if let Some(pos) = self.0.iter().position(|t| t.id == tag.id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(tag.clone());
            true
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns `true` if a tag with the given id is selected.
    #[must_use]
    pub fn contains(&self, id: &TagId) -> bool {
        self.0.iter().any(|t| &t.id == id)
    }

    /// Returns the selected tags in selection order.
    #[must_use]
    pub fn as_slice(&self) -> &[TagOption] {
        &self.0
    }

    /// Returns the number of selected tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the selected tags in selection order.
    pub fn iter(&self) -> std::slice::Iter<'_, TagOption> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a SelectedTags {
    type Item = &'a TagOption;
    type IntoIter = std::slice::Iter<'a, TagOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: &str, category: &str) -> TagOption {
        TagOption::new(TagId::new(id).unwrap(), id, id, category)
    }

    #[test]
    fn deserialized_selection_rejects_blank_ids() {
        let valid = r#"[{"id":"t1","label":"雨天","value":"rainy","category":"天气"}]"#;
        let selected: SelectedTags = serde_json::from_str(valid).unwrap();
        assert_eq!(selected.len(), 1);

        let blank = r#"[{"id":"","label":"雨天","value":"rainy","category":"天气"}]"#;
        assert!(serde_json::from_str::<SelectedTags>(blank).is_err());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selected = SelectedTags::new();
        let rain = tag("rain", "天气");

        assert!(selected.toggle(&rain));
        assert!(selected.contains(rain.id()));
        assert!(!selected.toggle(&rain));
        assert!(selected.is_empty());
    }

    #[test]
    fn membership_is_by_id_only() {
        let mut selected = SelectedTags::new();
        let original = TagOption::new(TagId::new("t1").unwrap(), "雨天", "rainy", "天气");
        let relabelled = TagOption::new(TagId::new("t1").unwrap(), "下雨", "rain", "氛围");

        selected.toggle(&original);
        assert!(!selected.toggle(&relabelled));
        assert!(selected.is_empty());
    }

    #[test]
    fn toggle_preserves_selection_order() {
        let mut selected = SelectedTags::new();
        for id in ["a", "b", "c"] {
            selected.toggle(&tag(id, "x"));
        }
        selected.toggle(&tag("b", "x"));

        let ids: Vec<_> = selected.iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn clear_empties_selection() {
        let mut selected = SelectedTags::new();
        selected.toggle(&tag("a", "x"));
        selected.toggle(&tag("b", "y"));
        selected.clear();
        assert_eq!(selected.len(), 0);
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let tags = vec![
            tag("a", "光影"),
            tag("b", "镜头"),
            tag("c", "光影"),
            tag("d", "氛围"),
        ];
        let groups = group_by_category(&tags);

        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["光影", "镜头", "氛围"]);
        assert_eq!(groups[0].tags.len(), 2);
        assert_eq!(groups[0].tags[1].id().as_str(), "c");
    }
}
