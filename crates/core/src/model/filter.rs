use crate::model::Restaurant;

/// Status part of the restaurant filter. Starts out showing every status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(&self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    /// Parse the value of a filter button; `"all"` disables the status check.
    #[must_use]
    pub fn from_button(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

/// Status match AND case-insensitive search over name or address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    pub status: StatusFilter,
    pub search: String,
}

impl RestaurantFilter {
    #[must_use]
    pub fn new(status: StatusFilter, search: impl Into<String>) -> Self {
        Self {
            status,
            search: search.into(),
        }
    }

    #[must_use]
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        if !self.status.matches(&restaurant.status) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        restaurant.display_name.to_lowercase().contains(&needle)
            || restaurant
                .address
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(&needle))
    }

    /// Restaurants passing the filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, restaurants: &'a [Restaurant]) -> Vec<&'a Restaurant> {
        restaurants.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn restaurants() -> Vec<Restaurant> {
        serde_json::from_value(json!([
            {"name": "A", "restaurant_name": "A", "status": "active", "address": "Main St"},
            {"name": "B", "restaurant_name": "B", "status": "inactive", "address": "Oak Rd"}
        ]))
        .unwrap()
    }

    fn names(found: &[&Restaurant]) -> Vec<String> {
        found.iter().map(|r| r.display_name.clone()).collect()
    }

    #[test]
    fn status_and_search_are_conjunctive() {
        let list = restaurants();
        let active = StatusFilter::Only("active".into());
        assert!(RestaurantFilter::new(active.clone(), "oak").apply(&list).is_empty());
        assert_eq!(
            names(&RestaurantFilter::new(active, "main").apply(&list)),
            vec!["A"]
        );
    }

    #[test]
    fn all_with_empty_search_keeps_everything() {
        let list = restaurants();
        let filter = RestaurantFilter::new(StatusFilter::from_button("all"), "  ");
        assert_eq!(names(&filter.apply(&list)), vec!["A", "B"]);
    }

    #[test]
    fn default_filter_shows_every_status() {
        let list = restaurants();
        assert_eq!(RestaurantFilter::default().status, StatusFilter::All);
        assert_eq!(names(&RestaurantFilter::default().apply(&list)), vec!["A", "B"]);
    }

    #[test]
    fn status_comparison_is_exact() {
        let list = restaurants();
        let capitalised = RestaurantFilter::new(StatusFilter::from_button("Active"), "");
        assert!(capitalised.apply(&list).is_empty());
        assert_eq!(StatusFilter::from_button("ALL"), StatusFilter::Only("ALL".into()));
        assert_eq!(
            names(&RestaurantFilter::new(StatusFilter::from_button("inactive"), "").apply(&list)),
            vec!["B"]
        );
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let list = restaurants();
        let filter = RestaurantFilter::new(StatusFilter::All, "b");
        assert_eq!(names(&filter.apply(&list)), vec!["B"]);
    }
}
