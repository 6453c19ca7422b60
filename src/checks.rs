//! Derived views over fetched collections
//!
//! Role-based order scoping, the order/material consistency checks and the
//! active store count. Everything here works on data already in memory.

use std::collections::HashSet;

use serde::Serialize;

use crate::client::PageParams;
use crate::client::models::{LOCAL_ADMIN, Material, Order, SUPER_ADMIN, Store, User};

/// Which orders a user may list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Every store
    All,
    /// Only the given store
    Store(i64),
    /// No order access
    Denied,
}

impl OrderScope {
    /// Super admins see everything; local admins see their own store.
    pub fn for_user(user: &User) -> Self {
        if user.has_role(SUPER_ADMIN) {
            OrderScope::All
        } else if user.has_role(LOCAL_ADMIN) {
            match user.store {
                Some(ref store) => OrderScope::Store(store.id),
                None => OrderScope::Denied,
            }
        } else {
            OrderScope::Denied
        }
    }

    /// Constrain `params` to this scope. `None` when nothing may be listed.
    ///
    /// A local admin's store always wins over a requested store filter.
    pub fn restrict(self, params: PageParams) -> Option<PageParams> {
        match self {
            OrderScope::All => Some(params),
            OrderScope::Store(store_id) => Some(params.store_id(store_id)),
            OrderScope::Denied => None,
        }
    }
}

/// An order whose material no longer exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedOrder {
    pub order_id: i64,
    pub material_text: String,
    pub size_name: String,
    pub store_title: Option<String>,
    pub reason: OrphanReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrphanReason {
    /// No material carries this description at all
    MaterialMissing,
    /// The material exists but not in this size
    SizeMissing,
    /// Material and size exist, but not at the order's store
    StoreMissing,
}

impl std::fmt::Display for OrphanReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            OrphanReason::MaterialMissing => "material no longer exists",
            OrphanReason::SizeMissing => "size no longer offered",
            OrphanReason::StoreMissing => "not stocked at store",
        };
        f.write_str(text)
    }
}

fn key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Flag orders whose material/size (and store, when named) matches no material.
///
/// Text comparison ignores case and surrounding whitespace.
pub fn find_orphaned_orders(orders: &[Order], materials: &[Material]) -> Vec<OrphanedOrder> {
    let texts: HashSet<String> = materials.iter().map(|m| key(&m.text)).collect();

    let text_sizes: HashSet<(String, String)> = materials
        .iter()
        .filter_map(|m| Some((key(&m.text), key(m.size_name.as_deref()?))))
        .collect();

    let text_size_stores: HashSet<(String, String, String)> = materials
        .iter()
        .filter_map(|m| {
            Some((
                key(&m.text),
                key(m.size_name.as_deref()?),
                key(m.store_title.as_deref()?),
            ))
        })
        .collect();

    orders
        .iter()
        .filter_map(|order| {
            let text = key(&order.material_text);
            let size = key(&order.size_name);

            let reason = if !texts.contains(&text) {
                OrphanReason::MaterialMissing
            } else if !text_sizes.contains(&(text.clone(), size.clone())) {
                OrphanReason::SizeMissing
            } else {
                let Some(store) = order.store_title.as_deref().map(key) else {
                    return None;
                };
                let wanted = (text, size, store);
                if text_size_stores.contains(&wanted) {
                    return None;
                }
                OrphanReason::StoreMissing
            };

            Some(OrphanedOrder {
                order_id: order.id,
                material_text: order.material_text.clone(),
                size_name: order.size_name.clone(),
                store_title: order.store_title.clone(),
                reason,
            })
        })
        .collect()
}

/// Orders placed for `material` in its current size (and store, when both name one).
pub fn orders_using_material(orders: &[Order], material: &Material) -> usize {
    let Some(size) = material.size_name.as_deref().map(key) else {
        return 0;
    };
    let text = key(&material.text);
    let store = material.store_title.as_deref().map(key);

    orders
        .iter()
        .filter(|order| key(&order.material_text) == text && key(&order.size_name) == size)
        .filter(|order| match (order.store_title.as_deref(), store.as_deref()) {
            (Some(ordered_at), Some(stocked_at)) => key(ordered_at) == stocked_at,
            _ => true,
        })
        .count()
}

/// Stores counted as active on the dashboard.
pub fn count_active_stores(stores: &[Store]) -> usize {
    stores.iter().filter(|s| s.is_active()).count()
}
