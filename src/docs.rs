use rollgate_core::{ErrorKind, ErrorResponse};
use rollgate_models::{
    MessageResponse, PasswordChangeRequestDto, RegisterRequestDto, RegisterResponse, RoleInfo,
    SanitizedUser,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::confirm_email,
        crate::modules::students::controller::request_password_change,
    ),
    components(
        schemas(
            RegisterRequestDto,
            RegisterResponse,
            SanitizedUser,
            RoleInfo,
            PasswordChangeRequestDto,
            MessageResponse,
            ErrorResponse,
            ErrorKind,
        )
    ),
    tags(
        (name = "Authentication", description = "Student self-registration and email confirmation"),
        (name = "Students", description = "Password change requests against the student record")
    ),
    info(
        title = "Rollgate API",
        version = "0.1.0",
        description = "Institutional student registration service"
    )
)]
pub struct ApiDoc;
