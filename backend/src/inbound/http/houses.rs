//! Listing API handlers.
//!
//! ```text
//! GET /houseCollection?page=0&limit=10
//! GET /totalHouse
//! GET /singleHouseData/{id}          (token required)
//! GET /ownHouses/{email}             (token required)
//! GET /searchHouses?searchText=dhaka
//! GET /filterInfo
//! POST /addNewHouse                  (token required)
//! PUT /updateHouseData/{id}          (token required)
//! DELETE /deleteHouseData/{id}       (token required)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageParams;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{Attributes, Error, HouseChanges, HouseDraft, SearchText};
use crate::inbound::http::ApiResult;
use crate::inbound::http::documents::{FilterInfoBody, HouseBody, NewHouseRequest};
use crate::inbound::http::schemas::{
    DeleteOutcomeSchema, ErrorSchema, FilterInfoSchema, HouseSchema, InsertOutcomeSchema,
    NewHouseSchema, TotalHouseSchema, UnauthorizedSchema, UpdateOutcomeSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_document_id, parse_email, parse_page, validate_owner_change,
};
use crate::middleware::{AuthenticatedClaims, RequireAuth};

/// Query string of `/searchHouses`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default, rename = "searchText")]
    pub search_text: String,
}

fn house_list(houses: &[crate::domain::House]) -> Vec<HouseBody<'_>> {
    houses.iter().map(HouseBody::from).collect()
}

/// One page of listings.
#[utoipa::path(
    get,
    path = "/houseCollection",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index (default 0)"),
        ("limit" = Option<u64>, Query, description = "Page size, 1 to 100 (default 10)")
    ),
    responses(
        (status = 200, description = "Listings on the page", body = [HouseSchema]),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema)
    ),
    tags = ["houses"],
    operation_id = "houseCollection",
    security([])
)]
#[get("/houseCollection")]
pub async fn house_collection(
    state: web::Data<HttpState>,
    query: web::Query<PageParams>,
) -> ApiResult<HttpResponse> {
    let page = parse_page(query.into_inner())?;
    let houses = state.houses_query.list_page(page).await?;
    Ok(HttpResponse::Ok().json(house_list(&houses)))
}

/// Number of stored listings.
#[utoipa::path(
    get,
    path = "/totalHouse",
    responses((status = 200, description = "Listing count", body = TotalHouseSchema)),
    tags = ["houses"],
    operation_id = "totalHouse",
    security([])
)]
#[get("/totalHouse")]
pub async fn total_house(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let total = state.houses_query.count().await?;
    Ok(HttpResponse::Ok().json(json!({ "totalHouse": total })))
}

/// One listing, or `null` when absent.
#[utoipa::path(
    get,
    path = "/singleHouseData/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing or null", body = Option<HouseSchema>),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = UnauthorizedSchema)
    ),
    tags = ["houses"],
    operation_id = "singleHouseData",
    security(("BearerToken" = []))
)]
#[get("/singleHouseData/{id}", wrap = "RequireAuth")]
pub async fn single_house_data(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_document_id(&path.into_inner(), FieldName::new("id"))?;
    let house = state.houses_query.get(&id).await?;
    Ok(HttpResponse::Ok().json(house.as_ref().map(HouseBody::from)))
}

/// Listings owned by `email`.
#[utoipa::path(
    get,
    path = "/ownHouses/{email}",
    params(("email" = String, Path, description = "Owner's email address")),
    responses(
        (status = 200, description = "Owned listings", body = [HouseSchema]),
        (status = 401, description = "Missing or invalid token", body = UnauthorizedSchema)
    ),
    tags = ["houses"],
    operation_id = "ownHouses",
    security(("BearerToken" = []))
)]
#[get("/ownHouses/{email}", wrap = "RequireAuth")]
pub async fn own_houses(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = parse_email(&path.into_inner(), FieldName::new("email"))?;
    let houses = state.houses_query.list_by_owner(&owner).await?;
    Ok(HttpResponse::Ok().json(house_list(&houses)))
}

/// Case-insensitive substring search over name, city, and address.
#[utoipa::path(
    get,
    path = "/searchHouses",
    params(("searchText" = Option<String>, Query, description = "Literal text; empty matches all")),
    responses((status = 200, description = "Matching listings", body = [HouseSchema])),
    tags = ["houses"],
    operation_id = "searchHouses",
    security([])
)]
#[get("/searchHouses")]
pub async fn search_houses(
    state: web::Data<HttpState>,
    query: web::Query<SearchParams>,
) -> ApiResult<HttpResponse> {
    let text = SearchText::new(&query.search_text);
    let houses = state.houses_query.search(&text).await?;
    debug!(text = text.as_str(), hits = houses.len(), "house search");
    Ok(HttpResponse::Ok().json(house_list(&houses)))
}

/// Distinct values of the filterable fields.
#[utoipa::path(
    get,
    path = "/filterInfo",
    responses((status = 200, description = "Distinct filter values", body = FilterInfoSchema)),
    tags = ["houses"],
    operation_id = "filterInfo",
    security([])
)]
#[get("/filterInfo")]
pub async fn filter_info(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let options = state.houses_query.filter_options().await?;
    Ok(HttpResponse::Ok().json(FilterInfoBody::from(&options)))
}

/// Store a new listing.
#[utoipa::path(
    post,
    path = "/addNewHouse",
    request_body = NewHouseSchema,
    responses(
        (status = 200, description = "Insertion outcome", body = InsertOutcomeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = UnauthorizedSchema)
    ),
    tags = ["houses"],
    operation_id = "addNewHouse",
    security(("BearerToken" = []))
)]
#[post("/addNewHouse", wrap = "RequireAuth")]
pub async fn add_new_house(
    state: web::Data<HttpState>,
    claims: AuthenticatedClaims,
    payload: web::Json<NewHouseRequest>,
) -> ApiResult<HttpResponse> {
    let NewHouseRequest {
        house_owner,
        attributes,
    } = payload.into_inner();
    let owner = parse_email(&house_owner, FieldName::new("houseOwner"))?;
    debug!(actor = %claims.0.email(), owner = %owner, "adding house");
    let outcome = state
        .houses
        .create(HouseDraft::new(owner, attributes))
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Set the supplied fields on a listing, creating it when absent.
#[utoipa::path(
    put,
    path = "/updateHouseData/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = NewHouseSchema,
    responses(
        (status = 200, description = "Update outcome", body = UpdateOutcomeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = UnauthorizedSchema)
    ),
    tags = ["houses"],
    operation_id = "updateHouseData",
    security(("BearerToken" = []))
)]
#[put("/updateHouseData/{id}", wrap = "RequireAuth")]
pub async fn update_house_data(
    state: web::Data<HttpState>,
    claims: AuthenticatedClaims,
    path: web::Path<String>,
    payload: web::Json<Attributes>,
) -> ApiResult<HttpResponse> {
    let id = parse_document_id(&path.into_inner(), FieldName::new("id"))?;
    let changes = HouseChanges::new(payload.into_inner());
    if changes.is_empty() {
        return Err(Error::invalid_request("update must set at least one field"));
    }
    validate_owner_change(&changes)?;
    debug!(actor = %claims.0.email(), %id, "updating house");
    let outcome = state.houses.update(&id, changes).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Remove a listing.
#[utoipa::path(
    delete,
    path = "/deleteHouseData/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Delete outcome", body = DeleteOutcomeSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = UnauthorizedSchema)
    ),
    tags = ["houses"],
    operation_id = "deleteHouseData",
    security(("BearerToken" = []))
)]
#[delete("/deleteHouseData/{id}", wrap = "RequireAuth")]
pub async fn delete_house_data(
    state: web::Data<HttpState>,
    claims: AuthenticatedClaims,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_document_id(&path.into_inner(), FieldName::new("id"))?;
    debug!(actor = %claims.0.email(), %id, "deleting house");
    let outcome = state.houses.delete(&id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[cfg(test)]
#[path = "houses_tests.rs"]
mod tests;
