/*
 * Responsibility
 * - Handler から見える「認証済み identity」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */
use std::collections::HashMap;

use axum::http::Extensions;

use crate::services::auth::Claims;

/// Verified claims keyed by identity field name (`"user"` unless configured otherwise).
///
/// Several gates with different identity fields can run on the same request; each one adds
/// its own entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityContext {
    fields: HashMap<String, Claims>,
}

impl IdentityContext {
    pub fn get(&self, field: &str) -> Option<&Claims> {
        self.fields.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, claims: Claims) {
        self.fields.insert(field.into(), claims);
    }

    /// Add `claims` under `field` to the context stored in `extensions`, creating it if needed.
    pub fn attach(extensions: &mut Extensions, field: &str, claims: Claims) {
        match extensions.get_mut::<IdentityContext>() {
            Some(ctx) => ctx.insert(field, claims),
            None => {
                let mut ctx = IdentityContext::default();
                ctx.insert(field, claims);
                extensions.insert(ctx);
            }
        }
    }
}
