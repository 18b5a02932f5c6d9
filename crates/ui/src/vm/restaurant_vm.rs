use chrono::NaiveDate;

use audit_core::model::{Access, Restaurant, RestaurantFilter, RestaurantId};

use crate::vm::time_fmt::{format_date, format_long_date, last_audit_label};

/// Text shown when a locked card is clicked.
pub const NOT_ACCESSIBLE_MESSAGE: &str =
    "This restaurant is not accessible. Please contact your administrator.";

#[derive(Clone, Debug, PartialEq)]
pub struct RestaurantCardVm {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    pub status: String,
    pub auditor: String,
    pub total_audits: u32,
    pub my_audits: u32,
    pub radius_label: String,
    pub last_audit: String,
    pub week_complete: bool,
    pub week_message: Option<String>,
    pub next_access: Option<String>,
    pub has_progress: bool,
    pub clickable: bool,
    pub restaurant: Restaurant,
}

impl RestaurantCardVm {
    #[must_use]
    pub fn new(restaurant: &Restaurant, today: NaiveDate) -> Self {
        let auditor = format!(
            "{} ({})",
            restaurant.employee_name.as_deref().unwrap_or("Unassigned"),
            restaurant.designation.as_deref().unwrap_or("—"),
        );
        Self {
            id: restaurant.id.clone(),
            name: restaurant.display_name.clone(),
            address: restaurant
                .address
                .clone()
                .unwrap_or_else(|| "Address not specified".to_string()),
            status: restaurant.status.clone(),
            auditor,
            total_audits: restaurant.total_audits,
            my_audits: restaurant.my_audits,
            radius_label: format!("{}m radius", restaurant.location_radius),
            last_audit: last_audit_label(restaurant.last_audit_date, today),
            week_complete: restaurant.week_complete,
            week_message: restaurant.week_message.clone(),
            next_access: restaurant
                .next_access
                .filter(|_| restaurant.week_complete)
                .map(format_date),
            has_progress: restaurant.has_progress,
            clickable: restaurant.is_clickable(),
            restaurant: restaurant.clone(),
        }
    }

    #[must_use]
    pub fn card_class(&self) -> String {
        let mut class = String::from("card restaurant-card");
        if self.has_progress {
            class.push_str(" has-progress");
        }
        if self.week_complete {
            class.push_str(" week-completed");
        }
        class.push_str(if self.clickable { " clickable" } else { " locked" });
        class
    }
}

/// Cards for the restaurants passing `filter`, in backend order.
#[must_use]
pub fn map_restaurant_cards(
    restaurants: &[Restaurant],
    filter: &RestaurantFilter,
    today: NaiveDate,
) -> Vec<RestaurantCardVm> {
    filter
        .apply(restaurants)
        .into_iter()
        .map(|r| RestaurantCardVm::new(r, today))
        .collect()
}

/// Alert text for a card that cannot start an audit.
#[must_use]
pub fn blocked_message(access: &Access) -> Option<String> {
    match access {
        Access::Open => None,
        Access::WeekComplete {
            message,
            next_access,
        } => {
            let next = next_access.map_or_else(|| "Next week".to_string(), format_long_date);
            Some(format!(
                "{}\n\nNext access: {next}",
                message.as_deref().unwrap_or_default()
            ))
        }
        Access::Denied => Some(NOT_ACCESSIBLE_MESSAGE.to_string()),
    }
}

/// Question shown before resuming saved answers.
#[must_use]
pub fn resume_prompt(restaurant: &Restaurant) -> String {
    let (answered, updated) = restaurant.progress_data.as_ref().map_or((0, None), |p| {
        (p.answered_count(), p.last_updated.clone())
    });
    let updated = updated.unwrap_or_else(|| "an earlier visit".to_string());
    format!(
        "You have {answered} answers saved from {updated}. Would you like to continue or start fresh?"
    )
}
