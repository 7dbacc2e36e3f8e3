use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ColorAnalysis, FashionItem, PaletteColor, StyleAnalysis, StyleCategory};
use crate::services::palette::{extract_palette, DEFAULT_PALETTE_SIZE};
use crate::services::recommendations::materialize;
use crate::services::similarity::rank;
use crate::services::{categorizer, studio};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub style_category: Option<StyleCategory>,
    pub color_palette: Vec<PaletteColor>,
    pub has_image: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&FashionItem> for ItemResponse {
    fn from(item: &FashionItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            description: item.description.clone(),
            style_category: item.style_category,
            color_palette: item.color_palette.clone(),
            has_image: item.image.is_some(),
            created_at: item.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub item: ItemResponse,
    pub style_analysis: StyleAnalysis,
    pub color_analysis: ColorAnalysis,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub id: Uuid,
    pub source_item: Uuid,
    pub recommended_item: Uuid,
    pub recommended_item_details: Option<ItemResponse>,
    pub similarity_score: f32,
    pub recommendation_reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub source_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeStyleRequest {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::InvalidInput(format!("Invalid item id: {}", raw)))
}

fn item_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Fashion item {} not found", id))
}

/// Classifies and palettes a freshly uploaded image, tolerating failure.
///
/// The creation path mirrors the analyze endpoint but must not fail the
/// upload when inference is down; failures are logged and the analysis
/// fields stay empty until an explicit analyze call.
async fn try_analyze(state: &AppState, item: &mut FashionItem) {
    let Some(image) = item.image.clone() else {
        return;
    };

    match state.classifier.classify(&image).await {
        Ok(predictions) => {
            item.style_category = Some(categorizer::categorize(&predictions));
        }
        Err(e) => {
            tracing::warn!(item_id = %item.id, error = %e, "Style classification failed at creation");
        }
    }

    match extract_palette(&image, DEFAULT_PALETTE_SIZE) {
        Ok(palette) => item.color_palette = palette,
        Err(e) => {
            tracing::warn!(item_id = %item.id, error = %e, "Palette extraction failed at creation");
        }
    }
}

// Handlers

/// Public health check
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "fashion-ml-api"
    }))
}

/// Create a fashion item from a multipart upload
///
/// An attached image is analyzed inline; the item is stored even when
/// analysis fails.
pub async fn create_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ItemResponse>)> {
    let mut title: Option<String> = None;
    let mut description = String::new();
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("title") => {
                title = Some(field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Invalid title field: {}", e))
                })?);
            }
            Some("description") => {
                description = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Invalid description field: {}", e))
                })?;
            }
            Some("image") => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Invalid image field: {}", e))
                })?;
                image = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Title is required".to_string()))?;

    let mut item = FashionItem::new(title, description, image);
    try_analyze(&state, &mut item).await;

    tracing::info!(item_id = %item.id, has_image = item.image.is_some(), "Created fashion item");

    let response = ItemResponse::from(&item);
    state.inner.write().await.items.insert(item);

    Ok((StatusCode::CREATED, Json(response)))
}

/// List all fashion items in creation order
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<ItemResponse>> {
    let inner = state.inner.read().await;
    let items: Vec<ItemResponse> = inner.items.list().iter().map(ItemResponse::from).collect();
    Json(items)
}

/// Fetch a single fashion item
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ItemResponse>> {
    let id = parse_id(&id)?;
    let inner = state.inner.read().await;
    let item = inner.items.get(id).ok_or_else(|| item_not_found(id))?;
    Ok(Json(ItemResponse::from(item)))
}

/// Update an item's title and/or description
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> AppResult<Json<ItemResponse>> {
    let id = parse_id(&id)?;
    let mut inner = state.inner.write().await;
    let item = inner.items.get_mut(id).ok_or_else(|| item_not_found(id))?;

    if let Some(title) = request.title {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
        }
        item.title = title;
    }
    if let Some(description) = request.description {
        item.description = description;
    }

    Ok(Json(ItemResponse::from(&*item)))
}

/// Delete an item, cascading to its recommendation edges
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    let mut inner = state.inner.write().await;
    inner.items.remove(id).ok_or_else(|| item_not_found(id))?;
    let removed_edges = inner.recommendations.remove_for_item(id);

    tracing::info!(item_id = %id, removed_edges, "Deleted fashion item");

    Ok(StatusCode::NO_CONTENT)
}

/// Run style classification and palette extraction on a stored item
pub async fn analyze_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AnalyzeResponse>> {
    let id = parse_id(&id)?;

    // Snapshot the image so the store is not locked across inference
    let image = {
        let inner = state.inner.read().await;
        let item = inner.items.get(id).ok_or_else(|| item_not_found(id))?;
        item.image
            .clone()
            .ok_or_else(|| AppError::InvalidInput("No image available".to_string()))?
    };

    let predictions = state.classifier.classify(&image).await?;
    let style_category = categorizer::categorize(&predictions);
    let palette = extract_palette(&image, DEFAULT_PALETTE_SIZE)?;

    let mut inner = state.inner.write().await;
    let item = inner.items.get_mut(id).ok_or_else(|| item_not_found(id))?;
    item.style_category = Some(style_category);
    item.color_palette = palette.clone();

    tracing::info!(item_id = %id, style_category = %style_category, "Analyzed fashion item");

    Ok(Json(AnalyzeResponse {
        item: ItemResponse::from(&*item),
        style_analysis: StyleAnalysis {
            predictions,
            style_category,
        },
        color_analysis: ColorAnalysis { palette },
    }))
}

/// Rank items similar to the given one, materializing recommendation edges
pub async fn similar_items(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let id = parse_id(&id)?;
    let mut inner = state.inner.write().await;

    let source = inner
        .items
        .get(id)
        .cloned()
        .ok_or_else(|| item_not_found(id))?;
    let candidates = inner.items.list();

    let ranked = rank(&source, &candidates);
    let outcome = materialize(&mut inner.recommendations, id, &ranked);

    tracing::info!(
        source_item = %id,
        candidates = candidates.len(),
        upserted = outcome.upserted,
        "Materialized similarity ranking"
    );

    let responses = inner
        .recommendations
        .fetch(id)
        .iter()
        .map(|row| to_recommendation_response(row, &inner))
        .collect();

    Ok(Json(responses))
}

/// List recommendation edges, optionally filtered by source item
pub async fn list_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let source = match query.source_id {
        Some(raw) => Some(
            Uuid::parse_str(&raw)
                .map_err(|_| AppError::InvalidInput(format!("Invalid source_id: {}", raw)))?,
        ),
        None => None,
    };

    let inner = state.inner.read().await;
    let responses = inner
        .recommendations
        .list(source)
        .iter()
        .map(|row| to_recommendation_response(row, &inner))
        .collect();

    Ok(Json(responses))
}

fn to_recommendation_response(
    row: &crate::models::StyleRecommendation,
    inner: &super::state::AppStateInner,
) -> RecommendationResponse {
    RecommendationResponse {
        id: row.id,
        source_item: row.source_item,
        recommended_item: row.recommended_item,
        recommended_item_details: inner.items.get(row.recommended_item).map(ItemResponse::from),
        similarity_score: row.similarity_score,
        recommendation_reason: row.recommendation_reason.clone(),
        created_at: row.created_at,
    }
}

/// Generate design ideas from a prompt
pub async fn generate_ideas(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> AppResult<Json<studio::IdeasResponse>> {
    let prompt = request
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Prompt is required".to_string()))?;

    Ok(Json(state.studio.generate_ideas(&prompt).await))
}

/// Generate a design image from a prompt
pub async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> AppResult<Json<studio::GeneratedImageResponse>> {
    let prompt = request
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Prompt is required".to_string()))?;

    Ok(Json(state.studio.generate_image(&prompt).await))
}

/// Analyze a style from an image URL (simulated)
pub async fn analyze_style(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeStyleRequest>,
) -> AppResult<Json<studio::StyleAnalysisResponse>> {
    let image_url = request
        .image_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Image URL is required".to_string()))?;

    Ok(Json(state.studio.analyze_style(&image_url).await))
}

/// Status of the simulated models
pub async fn model_status(State(state): State<AppState>) -> Json<studio::ModelStatusResponse> {
    Json(state.studio.model_status())
}
