//! Permission tree state model.
//!
//! Holds the sections and actions of one role, answers the "select all"
//! aggregate per section, and tracks which sections are expanded and which
//! action is highlighted in the bound-route panel. All mutation goes through `&mut self`; rendering reads
//! the tree and never changes it.

use std::collections::{HashMap, HashSet};

use crate::models::{BoundRoute, PermissionAction, PermissionSection};
use crate::services::error::TreeError;

#[derive(Debug, Clone, Default)]
pub struct PermissionTree {
    sections: Vec<PermissionSection>,
    /// identifier -> (section index, action index)
    action_index: HashMap<String, (usize, usize)>,
    /// Parallel to `sections`; every section starts collapsed.
    expanded: Vec<bool>,
    selected: Option<String>,
}

impl PermissionTree {
    /// Build a tree, keeping source order. Section keys and action
    /// identifiers must be unique; display names may repeat.
    pub fn new(sections: Vec<PermissionSection>) -> Result<Self, TreeError> {
        let mut section_keys = HashSet::new();
        let mut action_index = HashMap::new();

        for (si, section) in sections.iter().enumerate() {
            if !section_keys.insert(section.key()) {
                return Err(TreeError::DuplicateSection(section.key().to_string()));
            }
            for (ai, action) in section.actions.iter().enumerate() {
                if action_index
                    .insert(action.identifier.clone(), (si, ai))
                    .is_some()
                {
                    return Err(TreeError::DuplicateAction(action.identifier.clone()));
                }
            }
        }

        Ok(Self {
            expanded: vec![false; sections.len()],
            sections,
            action_index,
            selected: None,
        })
    }

    pub fn sections(&self) -> &[PermissionSection] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<PermissionSection> {
        self.sections
    }

    pub fn section(&self, section: &str) -> Result<&PermissionSection, TreeError> {
        let si = self.section_position(section)?;
        Ok(&self.sections[si])
    }

    pub fn action(&self, action: &str) -> Result<&PermissionAction, TreeError> {
        let (si, ai) = self.action_position(action)?;
        Ok(&self.sections[si].actions[ai])
    }

    /// Flip one action and return its new state.
    pub fn toggle_action(&mut self, section: &str, action: &str) -> Result<bool, TreeError> {
        let si = self.section_position(section)?;
        let ai = match self.action_index.get(action) {
            Some(&(owner, ai)) if owner == si => ai,
            _ => {
                tracing::warn!(section = %section, action = %action, "Action not in section");
                return Err(TreeError::ActionNotFound(action.to_string()));
            }
        };

        let entry = &mut self.sections[si].actions[ai];
        entry.enabled = !entry.enabled;
        tracing::debug!(section = %section, action = %action, enabled = entry.enabled, "Toggled action");
        Ok(entry.enabled)
    }

    /// "Select all": set every action of the section to the negation of the
    /// current aggregate. Returns the aggregate afterwards.
    pub fn toggle_section(&mut self, section: &str) -> Result<bool, TreeError> {
        let si = self.section_position(section)?;
        let target = !self.sections[si].all_enabled();

        for action in &mut self.sections[si].actions {
            action.enabled = target;
        }

        let selected = self.sections[si].all_enabled();
        tracing::debug!(section = %section, enabled = target, "Toggled section");
        Ok(selected)
    }

    pub fn is_section_fully_selected(&self, section: &str) -> Result<bool, TreeError> {
        Ok(self.section(section)?.all_enabled())
    }

    /// Open or close a section's collapse. Returns whether it is now open.
    pub fn toggle_expanded(&mut self, section: &str) -> Result<bool, TreeError> {
        let si = self.section_position(section)?;
        self.expanded[si] = !self.expanded[si];
        Ok(self.expanded[si])
    }

    pub fn is_expanded(&self, section: &str) -> Result<bool, TreeError> {
        let si = self.section_position(section)?;
        Ok(self.expanded[si])
    }

    pub fn expand_all(&mut self) {
        self.expanded.iter_mut().for_each(|open| *open = true);
    }

    /// Sections in source order, each with its expanded flag.
    pub fn sections_with_state(&self) -> impl Iterator<Item = (&PermissionSection, bool)> {
        self.sections.iter().zip(self.expanded.iter().copied())
    }

    /// Route bound to an action; `None` when the action governs no route.
    pub fn bound_route(&self, action: &str) -> Result<Option<&BoundRoute>, TreeError> {
        Ok(self.action(action)?.bound_route.as_ref())
    }

    /// Highlight an action in the bound-route panel.
    pub fn select_action(&mut self, action: &str) -> Result<(), TreeError> {
        self.action_position(action)?;
        self.selected = Some(action.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_action(&self) -> Option<&PermissionAction> {
        self.selected
            .as_deref()
            .and_then(|id| self.action_index.get(id))
            .map(|&(si, ai)| &self.sections[si].actions[ai])
    }

    pub fn selected_route(&self) -> Option<&BoundRoute> {
        self.selected_action()
            .and_then(|action| action.bound_route.as_ref())
    }

    /// Identifiers of enabled actions, in tree order.
    pub fn enabled_actions(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.actions.iter())
            .filter(|a| a.enabled)
            .map(|a| a.identifier.as_str())
            .collect()
    }

    /// Resolve a section by key, falling back to its display name when that
    /// name is unique.
    fn section_position(&self, section: &str) -> Result<usize, TreeError> {
        if let Some(si) = self.sections.iter().position(|s| s.key() == section) {
            return Ok(si);
        }

        let mut by_name = self
            .sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.name == section)
            .map(|(si, _)| si);
        match (by_name.next(), by_name.next()) {
            (Some(si), None) => Ok(si),
            (Some(_), Some(_)) => {
                tracing::warn!(section = %section, "Ambiguous permission section name");
                Err(TreeError::AmbiguousSection(section.to_string()))
            }
            _ => {
                tracing::warn!(section = %section, "Unknown permission section");
                Err(TreeError::SectionNotFound(section.to_string()))
            }
        }
    }

    fn action_position(&self, action: &str) -> Result<(usize, usize), TreeError> {
        self.action_index.get(action).copied().ok_or_else(|| {
            tracing::warn!(action = %action, "Unknown permission action");
            TreeError::ActionNotFound(action.to_string())
        })
    }
}
