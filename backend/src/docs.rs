#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::models::{
    country::{Country, CreateCountryPayload, UpdateCountryPayload},
    image::{
        AdminImageUploadResponse, ImageEditResponse, TestPromptResponse, UserImageItem,
        UserImagesPage, UserImagesQuery,
    },
    prompt::{
        CreatePromptPayload, Prompt, PromptCategory, PromptCategoryPayload,
        PromptCategoryResponse, PromptSubCategory, PromptSubCategoryPayload, UpdatePromptPayload,
    },
    supplier::{SupplierPayload, SupplierResponse},
    user::{LoginRequest, LoginResponse, SessionInfo, UserPublic},
    vat::{ValueAddedTax, ValueAddedTaxPayload},
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        login_doc,
        session_doc,
        logout_doc,
        list_user_images_doc,
        get_user_image_doc,
        list_vat_doc,
        get_vat_doc,
        create_vat_doc,
        update_vat_doc,
        delete_vat_doc,
        list_suppliers_doc,
        get_supplier_doc,
        create_supplier_doc,
        update_supplier_doc,
        delete_supplier_doc,
        list_countries_doc,
        get_country_doc,
        create_country_doc,
        update_country_doc,
        delete_country_doc,
        list_prompts_doc,
        get_prompt_doc,
        create_prompt_doc,
        update_prompt_doc,
        delete_prompt_doc,
        upload_admin_image_doc,
        get_prompt_test_image_doc,
        delete_prompt_test_image_doc,
        image_edit_doc,
        test_prompt_doc
    ),
    components(
        schemas(
            // auth
            LoginRequest,
            LoginResponse,
            SessionInfo,
            UserPublic,
            // catalog
            ValueAddedTax,
            ValueAddedTaxPayload,
            SupplierResponse,
            SupplierPayload,
            Country,
            CreateCountryPayload,
            UpdateCountryPayload,
            Prompt,
            PromptCategory,
            PromptCategoryResponse,
            PromptCategoryPayload,
            PromptSubCategory,
            PromptSubCategoryPayload,
            CreatePromptPayload,
            UpdatePromptPayload,
            // images & AI
            UserImageItem,
            UserImagesPage,
            UserImagesQuery,
            AdminImageUploadResponse,
            ImageEditResponse,
            TestPromptResponse
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Auth", description = "Login, session info and logout"),
        (name = "Images", description = "User image library"),
        (name = "Admin", description = "Backoffice CRUD"),
        (name = "AI", description = "Generative image editing")
    ),
    security(("SessionCookie" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session_id"))),
        );
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded; session cookie set", body = LoginResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Incorrect username or password")
    ),
    tag = "Auth",
    security(())
)]
fn login_doc() {}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session", body = SessionInfo),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Auth"
)]
fn session_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session removed and cookie cleared")),
    tag = "Auth",
    security(())
)]
fn logout_doc() {}

#[utoipa::path(
    get,
    path = "/api/user/images",
    params(UserImagesQuery),
    responses(
        (status = 200, description = "Page of the caller's images", body = UserImagesPage),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Images"
)]
fn list_user_images_doc() {}

#[utoipa::path(
    get,
    path = "/api/user/images/{filename}",
    params(("filename" = String, Path, description = "Stored filename")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Invalid filename"),
        (status = 404, description = "No such image")
    ),
    tag = "Images"
)]
fn get_user_image_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/vat",
    responses((status = 200, description = "All VAT rates", body = [ValueAddedTax])),
    tag = "Admin"
)]
fn list_vat_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/vat/{id}",
    params(("id" = i64, Path, description = "VAT id")),
    responses(
        (status = 200, description = "VAT rate", body = ValueAddedTax),
        (status = 404, description = "VAT not found")
    ),
    tag = "Admin"
)]
fn get_vat_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/vat",
    request_body = ValueAddedTaxPayload,
    responses(
        (status = 201, description = "Created", body = ValueAddedTax),
        (status = 409, description = "Duplicate name")
    ),
    tag = "Admin"
)]
fn create_vat_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/vat/{id}",
    params(("id" = i64, Path, description = "VAT id")),
    request_body = ValueAddedTaxPayload,
    responses(
        (status = 200, description = "Updated", body = ValueAddedTax),
        (status = 404, description = "VAT not found"),
        (status = 409, description = "Duplicate name")
    ),
    tag = "Admin"
)]
fn update_vat_doc() {}

#[utoipa::path(
    delete,
    path = "/api/admin/vat/{id}",
    params(("id" = i64, Path, description = "VAT id")),
    responses((status = 204, description = "Deleted")),
    tag = "Admin"
)]
fn delete_vat_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/suppliers",
    responses((status = 200, description = "All suppliers", body = [SupplierResponse])),
    tag = "Admin"
)]
fn list_suppliers_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/suppliers/{id}",
    params(("id" = i64, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Supplier", body = SupplierResponse),
        (status = 404, description = "Supplier not found")
    ),
    tag = "Admin"
)]
fn get_supplier_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/suppliers",
    request_body = SupplierPayload,
    responses((status = 201, description = "Created", body = SupplierResponse)),
    tag = "Admin"
)]
fn create_supplier_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/suppliers/{id}",
    params(("id" = i64, Path, description = "Supplier id")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Updated", body = SupplierResponse),
        (status = 404, description = "Supplier not found")
    ),
    tag = "Admin"
)]
fn update_supplier_doc() {}

#[utoipa::path(
    delete,
    path = "/api/admin/suppliers/{id}",
    params(("id" = i64, Path, description = "Supplier id")),
    responses((status = 204, description = "Deleted")),
    tag = "Admin"
)]
fn delete_supplier_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/countries",
    responses((status = 200, description = "All countries", body = [Country])),
    tag = "Admin"
)]
fn list_countries_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/countries/{id}",
    params(("id" = i64, Path, description = "Country id")),
    responses(
        (status = 200, description = "Country", body = Country),
        (status = 404, description = "Country not found")
    ),
    tag = "Admin"
)]
fn get_country_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/countries",
    request_body = CreateCountryPayload,
    responses(
        (status = 201, description = "Created", body = Country),
        (status = 409, description = "Duplicate name")
    ),
    tag = "Admin"
)]
fn create_country_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/countries/{id}",
    params(("id" = i64, Path, description = "Country id")),
    request_body = UpdateCountryPayload,
    responses(
        (status = 200, description = "Updated", body = Country),
        (status = 404, description = "Country not found"),
        (status = 409, description = "Duplicate name")
    ),
    tag = "Admin"
)]
fn update_country_doc() {}

#[utoipa::path(
    delete,
    path = "/api/admin/countries/{id}",
    params(("id" = i64, Path, description = "Country id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Country not found")
    ),
    tag = "Admin"
)]
fn delete_country_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/prompts",
    responses((status = 200, description = "All prompts with relations")),
    tag = "Admin"
)]
fn list_prompts_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/prompts/{id}",
    params(("id" = i64, Path, description = "Prompt id")),
    responses(
        (status = 200, description = "Prompt with relations"),
        (status = 404, description = "Prompt not found")
    ),
    tag = "Admin"
)]
fn get_prompt_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/prompts",
    request_body = CreatePromptPayload,
    responses((status = 201, description = "Created")),
    tag = "Admin"
)]
fn create_prompt_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/prompts/{id}",
    params(("id" = i64, Path, description = "Prompt id")),
    request_body = UpdatePromptPayload,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Prompt not found")
    ),
    tag = "Admin"
)]
fn update_prompt_doc() {}

#[utoipa::path(
    delete,
    path = "/api/admin/prompts/{id}",
    params(("id" = i64, Path, description = "Prompt id")),
    responses((status = 204, description = "Deleted")),
    tag = "Admin"
)]
fn delete_prompt_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/images",
    responses(
        (status = 201, description = "Stored", body = AdminImageUploadResponse),
        (status = 400, description = "Missing file, bad image type or undecodable image")
    ),
    tag = "Admin"
)]
fn upload_admin_image_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/images/prompt-test/{filename}",
    params(("filename" = String, Path, description = "Stored filename")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "No such image")
    ),
    tag = "Admin"
)]
fn get_prompt_test_image_doc() {}

#[utoipa::path(
    delete,
    path = "/api/admin/images/prompt-test/{filename}",
    params(("filename" = String, Path, description = "Stored filename")),
    responses((status = 204, description = "Deleted (idempotent)")),
    tag = "Admin"
)]
fn delete_prompt_test_image_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/ai/image-edit",
    responses(
        (status = 200, description = "Edited images stored", body = ImageEditResponse),
        (status = 400, description = "Missing image/prompt or unknown provider"),
        (status = 501, description = "Provider not implemented"),
        (status = 502, description = "Upstream provider failure")
    ),
    tag = "AI"
)]
fn image_edit_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/ai/test-prompt",
    responses(
        (status = 200, description = "Prompt test result", body = TestPromptResponse),
        (status = 422, description = "Master prompt missing"),
        (status = 501, description = "Provider not implemented"),
        (status = 502, description = "Upstream provider failure")
    ),
    tag = "AI"
)]
fn test_prompt_doc() {}
