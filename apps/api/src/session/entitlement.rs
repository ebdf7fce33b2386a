use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Template;

/// Template ids the session has paid for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entitlements(BTreeMap<String, bool>);

impl Entitlements {
    pub fn unlock(&mut self, template_id: &str) {
        self.0.insert(template_id.to_string(), true);
    }

    pub fn is_unlocked(&self, template_id: &str) -> bool {
        self.0.get(template_id).copied().unwrap_or(false)
    }
}

/// Whether a session may open a template's editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAccess {
    Granted,
    PurchaseRequired { template_id: String, price: u32 },
}

/// Free templates are always open; paid ones need an entitlement.
pub fn check_editor_access(template: &Template, entitlements: &Entitlements) -> EditorAccess {
    if !template.is_paid() || entitlements.is_unlocked(&template.id) {
        return EditorAccess::Granted;
    }
    EditorAccess::PurchaseRequired {
        template_id: template.id.clone(),
        price: template.price.unwrap_or_default(),
    }
}
