use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::checkout::{CheckoutRequest, CheckoutResponse, CheckoutSpec},
        services,
    },
    axum::{Json, extract::State},
};

pub async fn create_checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let spec = CheckoutSpec::from_request(req, &state.redirects)?;
    let response =
        services::checkout::create_checkout(&state.pool, state.gateway.as_ref(), &spec).await?;
    Ok(Json(response))
}
