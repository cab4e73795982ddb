//! Tree choices.
//!
//! Turns MPTT nodes into the choices a multi-select field offers: each
//! choice carries a label indented by the node's level and the
//! `(tree_id, left)` pair the client-side selector sorts on.

use serde::{Deserialize, Serialize};

use crate::config::SelectorConfig;
use crate::model::ControlOption;

/// A node of an MPTT tree, as needed to build a choice.
///
/// Missing tree metadata deserializes as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Primary key, used as the option value.
    pub pk: String,
    /// Human readable label.
    pub label: String,
    /// Depth of the node; roots are level 0.
    #[serde(default)]
    pub level: usize,
    /// Tree the node belongs to.
    #[serde(default)]
    pub tree_id: i64,
    /// Pre-order left bound within the tree.
    #[serde(default)]
    pub left: i64,
}

impl TreeNode {
    /// Creates a root node with zeroed tree metadata.
    pub fn new(pk: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            label: label.into(),
            level: 0,
            tree_id: 0,
            left: 0,
        }
    }

    /// Sets the level.
    pub fn at_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Sets the tree id and left value.
    pub fn in_tree(mut self, tree_id: i64, left: i64) -> Self {
        self.tree_id = tree_id;
        self.left = left;
        self
    }
}

/// A single selectable choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Submitted value (the node's primary key).
    pub value: String,
    /// Level-indented display label.
    pub label: String,
    /// `(tree_id, left)`.
    pub sort_fields: (i64, i64),
}

impl Choice {
    /// Creates a control option carrying this choice's sort fields as
    /// attributes.
    pub fn to_control_option(&self, config: &SelectorConfig) -> ControlOption {
        ControlOption::new(self.value.clone(), self.label.clone())
            .with_attribute(config.tree_id_attribute.clone(), self.sort_fields.0.to_string())
            .with_attribute(config.left_value_attribute.clone(), self.sort_fields.1.to_string())
    }
}

/// A choice or a labelled group of choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceEntry {
    /// A top-level choice.
    Single(Choice),
    /// Choices rendered inside an `<optgroup>`.
    Group {
        /// Group label.
        label: String,
        /// Choices of the group.
        choices: Vec<Choice>,
    },
}

impl From<Choice> for ChoiceEntry {
    fn from(choice: Choice) -> Self {
        Self::Single(choice)
    }
}

impl ChoiceEntry {
    /// Iterates over the choices of this entry.
    pub fn choices(&self) -> impl Iterator<Item = &Choice> {
        match self {
            Self::Single(choice) => std::slice::from_ref(choice).iter(),
            Self::Group { choices, .. } => choices.iter(),
        }
    }
}

/// Builds choices from tree nodes.
///
/// # Example
///
/// ```
/// use mptt_selectbox::choice::{ChoiceBuilder, TreeNode};
///
/// let builder = ChoiceBuilder::default();
/// let node = TreeNode::new("3", "Rust").at_level(2).in_tree(1, 4);
/// let choice = builder.choice(&node);
/// assert_eq!(choice.label, "|--|-- Rust");
/// assert_eq!(choice.sort_fields, (1, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceBuilder {
    level_indicator: String,
}

impl Default for ChoiceBuilder {
    fn default() -> Self {
        Self::from_config(&SelectorConfig::default())
    }
}

impl ChoiceBuilder {
    /// Creates a builder with a custom level indicator.
    pub fn new(level_indicator: impl Into<String>) -> Self {
        Self {
            level_indicator: level_indicator.into(),
        }
    }

    /// Creates a builder using the configured level indicator.
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::new(config.level_indicator.clone())
    }

    /// Returns the level indicator.
    pub fn level_indicator(&self) -> &str {
        &self.level_indicator
    }

    /// Formats the label of a node: the indicator once per level, a space,
    /// then the node label. Root nodes keep the leading space.
    pub fn label_for(&self, node: &TreeNode) -> String {
        format!("{} {}", self.level_indicator.repeat(node.level), node.label)
    }

    /// Builds the choice for a node.
    pub fn choice(&self, node: &TreeNode) -> Choice {
        Choice {
            value: node.pk.clone(),
            label: self.label_for(node),
            sort_fields: (node.tree_id, node.left),
        }
    }

    /// Builds one ungrouped entry per node.
    pub fn choices<'a>(&self, nodes: impl IntoIterator<Item = &'a TreeNode>) -> Vec<ChoiceEntry> {
        nodes
            .into_iter()
            .map(|node| ChoiceEntry::Single(self.choice(node)))
            .collect()
    }

    /// Builds a labelled group of choices.
    pub fn group<'a>(
        &self,
        label: impl Into<String>,
        nodes: impl IntoIterator<Item = &'a TreeNode>,
    ) -> ChoiceEntry {
        ChoiceEntry::Group {
            label: label.into(),
            choices: nodes.into_iter().map(|node| self.choice(node)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_by_level() {
        let builder = ChoiceBuilder::default();
        assert_eq!(builder.label_for(&TreeNode::new("1", "Blog")), " Blog");
        assert_eq!(
            builder.label_for(&TreeNode::new("2", "Python").at_level(1)),
            "|-- Python"
        );
        assert_eq!(
            builder.label_for(&TreeNode::new("3", "Django").at_level(2)),
            "|--|-- Django"
        );
    }

    #[test]
    fn test_custom_indicator() {
        let config = SelectorConfig::default().with_level_indicator("--");
        let builder = ChoiceBuilder::from_config(&config);
        assert_eq!(builder.level_indicator(), "--");
        assert_eq!(
            builder.label_for(&TreeNode::new("1", "Sub").at_level(1)),
            "-- Sub"
        );
    }

    #[test]
    fn test_missing_metadata_defaults_to_zero() {
        let node: TreeNode = serde_json::from_str(r#"{"pk": "5", "label": "Loose"}"#).unwrap();
        let choice = ChoiceBuilder::default().choice(&node);
        assert_eq!(choice.sort_fields, (0, 0));
        assert_eq!(choice.value, "5");
    }

    #[test]
    fn test_group_entries() {
        let builder = ChoiceBuilder::default();
        let nodes = vec![
            TreeNode::new("1", "Rust").in_tree(1, 1),
            TreeNode::new("2", "Async").at_level(1).in_tree(1, 2),
        ];
        let group = builder.group("Languages", &nodes);
        let values: Vec<_> = group.choices().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["1", "2"]);

        let flat = builder.choices(&nodes);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].choices().count(), 1);
    }

    #[test]
    fn test_to_control_option() {
        let config = SelectorConfig::default();
        let choice = ChoiceBuilder::default().choice(&TreeNode::new("9", "Go").in_tree(3, 7));
        let option = choice.to_control_option(&config);
        assert_eq!(option.value, "9");
        assert_eq!(option.attribute("data-tree-id"), Some("3"));
        assert_eq!(option.attribute("data-left-value"), Some("7"));
    }
}
