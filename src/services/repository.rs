use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{FashionItem, StyleRecommendation};

/// In-memory store of fashion items, preserving creation order
#[derive(Default)]
pub struct ItemStore {
    items: HashMap<Uuid, FashionItem>,
    order: Vec<Uuid>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: FashionItem) {
        self.order.push(item.id);
        self.items.insert(item.id, item);
    }

    pub fn get(&self, id: Uuid) -> Option<&FashionItem> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut FashionItem> {
        self.items.get_mut(&id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<FashionItem> {
        self.order.retain(|other| *other != id);
        self.items.remove(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.contains_key(&id)
    }

    /// All items in creation order
    pub fn list(&self) -> Vec<FashionItem> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// In-memory store of recommendation edges.
///
/// Holds at most one edge per (source, recommended) pair; rows keep their
/// insertion order, id and created_at across upserts.
#[derive(Default)]
pub struct RecommendationStore {
    rows: Vec<StyleRecommendation>,
}

impl RecommendationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates the edge for (source, recommended).
    ///
    /// An existing row keeps its id and created_at; only score and reason
    /// are overwritten. A self-referencing edge is rejected.
    pub fn upsert(
        &mut self,
        source: Uuid,
        recommended: Uuid,
        score: f32,
        reason: String,
    ) -> AppResult<()> {
        if source == recommended {
            return Err(AppError::InvalidInput(
                "An item cannot recommend itself".to_string(),
            ));
        }

        if let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.source_item == source && row.recommended_item == recommended)
        {
            row.similarity_score = score;
            row.recommendation_reason = reason;
            return Ok(());
        }

        self.rows.push(StyleRecommendation {
            id: Uuid::new_v4(),
            source_item: source,
            recommended_item: recommended,
            similarity_score: score,
            recommendation_reason: reason,
            created_at: Utc::now(),
        });
        Ok(())
    }

    /// All edges originating from the given item, in insertion order
    pub fn fetch(&self, source: Uuid) -> Vec<StyleRecommendation> {
        self.rows
            .iter()
            .filter(|row| row.source_item == source)
            .cloned()
            .collect()
    }

    /// All edges, optionally filtered by source item
    pub fn list(&self, source: Option<Uuid>) -> Vec<StyleRecommendation> {
        match source {
            Some(source) => self.fetch(source),
            None => self.rows.clone(),
        }
    }

    /// Drops every edge referencing the item, in either direction.
    ///
    /// Returns the number of removed edges. Called when an item is deleted
    /// so no edge is left dangling.
    pub fn remove_for_item(&mut self, id: Uuid) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|row| row.source_item != id && row.recommended_item != id);
        before - self.rows.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(title: &str) -> FashionItem {
        FashionItem::new(title.to_string(), String::new(), None)
    }

    #[test]
    fn test_item_store_list_preserves_creation_order() {
        let mut store = ItemStore::new();
        let first = test_item("first");
        let second = test_item("second");
        let first_id = first.id;
        store.insert(first);
        store.insert(second);

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first_id);
        assert_eq!(listed[0].title, "first");
    }

    #[test]
    fn test_item_store_remove() {
        let mut store = ItemStore::new();
        let item = test_item("gone");
        let id = item.id;
        store.insert(item);

        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_upsert_keeps_one_row_per_pair() {
        let mut store = RecommendationStore::new();
        let source = Uuid::new_v4();
        let target = Uuid::new_v4();

        store
            .upsert(source, target, 0.4, "first pass".to_string())
            .unwrap();
        let original_id = store.fetch(source)[0].id;

        store
            .upsert(source, target, 0.9, "second pass".to_string())
            .unwrap();

        let rows = store.fetch(source);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, original_id);
        assert_eq!(rows[0].similarity_score, 0.9);
        assert_eq!(rows[0].recommendation_reason, "second pass");
    }

    #[test]
    fn test_upsert_rejects_self_edge() {
        let mut store = RecommendationStore::new();
        let id = Uuid::new_v4();
        let result = store.upsert(id, id, 1.0, "self".to_string());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_opposite_directions_are_distinct_edges() {
        let mut store = RecommendationStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.upsert(a, b, 0.8, "a to b".to_string()).unwrap();
        store.upsert(b, a, 0.6, "b to a".to_string()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.fetch(a).len(), 1);
        assert_eq!(store.fetch(b).len(), 1);
    }

    #[test]
    fn test_list_filters_by_source() {
        let mut store = RecommendationStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        store.upsert(a, b, 0.8, String::new()).unwrap();
        store.upsert(a, c, 0.5, String::new()).unwrap();
        store.upsert(b, c, 0.2, String::new()).unwrap();

        assert_eq!(store.list(None).len(), 3);
        assert_eq!(store.list(Some(a)).len(), 2);
        assert_eq!(store.list(Some(c)).len(), 0);
    }

    #[test]
    fn test_remove_for_item_cascades_both_directions() {
        let mut store = RecommendationStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        store.upsert(a, b, 0.8, String::new()).unwrap();
        store.upsert(b, a, 0.7, String::new()).unwrap();
        store.upsert(b, c, 0.6, String::new()).unwrap();

        let removed = store.remove_for_item(a);
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.fetch(b)[0].recommended_item, c);
    }
}
