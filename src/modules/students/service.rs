use anyhow::anyhow;
use rollgate_core::AppError;
use rollgate_db::StudentStore;
use rollgate_models::{MessageResponse, PasswordChangeRequestDto};
use tracing::{info, instrument};

pub struct StudentService;

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl StudentService {
    /// Flags a student record for a password change.
    ///
    /// Both identifiers must match the same record. An unknown roll and a
    /// wrong email produce the same response so the endpoint cannot be used
    /// to probe which one exists. Repeating a request is harmless.
    #[instrument(skip_all)]
    pub async fn request_password_change(
        students: &dyn StudentStore,
        dto: PasswordChangeRequestDto,
    ) -> Result<MessageResponse, AppError> {
        let email = non_blank(dto.institutional_email.as_deref());
        let roll = non_blank(dto.roll.as_deref());

        let (Some(email), Some(roll)) = (email, roll) else {
            let mut missing = Vec::new();
            if email.is_none() {
                missing.push("institutionalEmail is required");
            }
            if roll.is_none() {
                missing.push("roll is required");
            }
            return Err(AppError::invalid_input(missing));
        };

        let student = students
            .find_by_roll_and_email(roll, email)
            .await
            .map_err(AppError::persistence)?
            .ok_or_else(|| AppError::not_found(anyhow!("No student found with the given details")))?;

        students
            .mark_password_change_requested(student.id)
            .await
            .map_err(AppError::persistence)?;
        info!(student_id = %student.id, "password change requested");

        Ok(MessageResponse {
            message: "Password change request submitted successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  2012345 ")), Some("2012345"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
