//! Customs declaration routes.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use smart_shipping_core::{DeclarationStatus, ShipmentId, TradeDirection, UserId};

use super::extract::{ApiJson, ApiQuery, lenient_id};
use super::finance::UserQuery;
use super::{non_empty, parse_direction, require, require_user};
use crate::db::customs::CustomsRepository;
use crate::error::{AppError, Result};
use crate::models::{CustomsDeclaration, CustomsDeclarationWithRoute, NewDeclaration};
use crate::services::references::{declaration_number, insert_with_fresh_number};
use crate::state::AppState;

/// Response of `GET /api/customs`.
#[derive(Debug, Serialize)]
pub struct DeclarationsResponse {
    pub success: bool,
    pub declarations: Vec<CustomsDeclarationWithRoute>,
}

/// A user's declarations, newest first.
///
/// GET /api/customs?userId=
///
/// # Errors
///
/// Returns 400 without `userId`.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<DeclarationsResponse>> {
    let user_id = require_user(query.user_id)?;
    let declarations = CustomsRepository::new(state.pool())
        .list_for_user(user_id)
        .await?;

    Ok(Json(DeclarationsResponse {
        success: true,
        declarations,
    }))
}

/// Body of `POST /api/customs/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeclarationRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<UserId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub shipment_id: Option<ShipmentId>,
    #[serde(rename = "type")]
    pub direction: Option<String>,
    pub port: Option<String>,
}

impl CreateDeclarationRequest {
    /// The declared trade direction, in any letter case.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `type` is missing or not
    /// Import/Export.
    pub fn direction(&self) -> Result<TradeDirection> {
        let raw = require(self.direction.as_deref(), "type")?;
        parse_direction(raw)
            .ok_or_else(|| AppError::BadRequest("type must be Import or Export".to_string()))
    }
}

/// Response of `POST /api/customs/create`.
#[derive(Debug, Serialize)]
pub struct DeclarationResponse {
    pub success: bool,
    pub declaration: CustomsDeclaration,
}

/// File a declaration. It is submitted immediately under a fresh
/// `DEC-NNNNNN` number.
///
/// POST /api/customs/create
///
/// # Errors
///
/// Returns 400 without `userId` or `type`.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateDeclarationRequest>,
) -> Result<Json<DeclarationResponse>> {
    let user_id = require_user(body.user_id)?;
    let direction = body.direction()?;
    let port = non_empty(body.port);

    let repo = CustomsRepository::new(state.pool());
    let repo = &repo;
    let declaration = insert_with_fresh_number(
        || declaration_number(&mut rand::rng()),
        move |declaration_number| {
            let new = NewDeclaration {
                user_id,
                shipment_id: body.shipment_id,
                declaration_number,
                direction,
                status: DeclarationStatus::Submitted,
                port: port.clone(),
            };
            async move { repo.create(&new).await }
        },
    )
    .await?;

    tracing::info!(
        declaration_id = %declaration.id,
        number = %declaration.declaration_number,
        "Customs declaration filed"
    );

    Ok(Json(DeclarationResponse {
        success: true,
        declaration,
    }))
}
