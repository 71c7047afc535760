//! Subscription pricing plans.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::PlanRepository;
use cinedesk_entity::plan::{CreatePlan, Plan, UpdatePlan};

use crate::context::RequestContext;

#[derive(Debug, Clone)]
pub struct PlanService {
    plans: Arc<PlanRepository>,
}

impl PlanService {
    pub fn new(plans: Arc<PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Plan> {
        self.plans
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Plan not found"))
    }

    pub async fn list(&self, active: Option<bool>, page: &PageRequest) -> AppResult<PageResponse<Plan>> {
        self.plans.list(active, page).await
    }

    pub async fn create(&self, ctx: &RequestContext, mut data: CreatePlan) -> AppResult<Plan> {
        data.name = required_name(&data.name)?;
        data.currency = currency_code(&data.currency)?;
        check_amounts(Some(data.price_cents), Some(data.duration_days))?;
        data.features = clean_features(data.features);

        let plan = self.plans.create(&data).await?;
        info!(admin_id = %ctx.user_id, plan_id = %plan.id, name = %plan.name, "Plan created");
        Ok(plan)
    }

    pub async fn update(&self, ctx: &RequestContext, id: Uuid, mut data: UpdatePlan) -> AppResult<Plan> {
        if let Some(name) = data.name.as_deref() {
            data.name = Some(required_name(name)?);
        }
        if let Some(currency) = data.currency.as_deref() {
            data.currency = Some(currency_code(currency)?);
        }
        check_amounts(data.price_cents, data.duration_days)?;
        data.features = data.features.map(clean_features);

        let plan = self
            .plans
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Plan not found"))?;
        info!(admin_id = %ctx.user_id, plan_id = %id, "Plan updated");
        Ok(plan)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.plans.delete(id).await? {
            return Err(AppError::not_found("Plan not found"));
        }
        info!(admin_id = %ctx.user_id, plan_id = %id, "Plan deleted");
        Ok(())
    }
}

fn required_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::invalid_field("name", "name is required"));
    }
    Ok(name.to_string())
}

/// Normalize an ISO 4217 code to upper case.
fn currency_code(raw: &str) -> AppResult<String> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::invalid_field(
            "currency",
            "currency must be a three-letter code",
        ));
    }
    Ok(code)
}

fn check_amounts(price_cents: Option<i64>, duration_days: Option<i32>) -> AppResult<()> {
    if price_cents.is_some_and(|p| p < 0) {
        return Err(AppError::invalid_field("priceCents", "priceCents must not be negative"));
    }
    if duration_days.is_some_and(|d| d < 1) {
        return Err(AppError::invalid_field("durationDays", "durationDays must be at least 1"));
    }
    Ok(())
}

fn clean_features(features: Vec<String>) -> Vec<String> {
    features
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code() {
        assert_eq!(currency_code(" vnd ").unwrap(), "VND");
        assert!(currency_code("dollars").is_err());
        assert!(currency_code("U$D").is_err());
    }

    #[test]
    fn test_amounts() {
        assert!(check_amounts(Some(0), Some(30)).is_ok());
        assert!(check_amounts(Some(-1), None).is_err());
        let err = check_amounts(None, Some(0)).unwrap_err();
        assert!(err.details.unwrap().get("durationDays").is_some());
    }

    #[test]
    fn test_features_are_trimmed() {
        let features = clean_features(vec![" 4K ".into(), "".into(), "No ads".into()]);
        assert_eq!(features, vec!["4K", "No ads"]);
    }
}
