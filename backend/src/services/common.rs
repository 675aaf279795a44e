//! Lookups and checks shared by the reference-data services

use shared::MaterialType;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Map a shared validation helper result onto a field error
pub fn check(result: Result<(), &'static str>, field: &str) -> AppResult<()> {
    result.map_err(|message| AppError::invalid(field, message))
}

/// Fail with 404 unless the subdivision exists
pub async fn require_subdivision(db: &PgPool, subdivision_id: i32) -> AppResult<()> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM subdivisions WHERE id = $1)",
    )
    .bind(subdivision_id)
    .fetch_one(db)
    .await?;

    if !exists {
        return Err(AppError::NotFound(format!("Subdivision {}", subdivision_id)));
    }
    Ok(())
}

/// Fail with 404 unless the material exists; returns its type
pub async fn require_material(db: &PgPool, material_id: i32) -> AppResult<MaterialType> {
    let material_type = sqlx::query_scalar::<_, String>(
        "SELECT material_type FROM materials WHERE id = $1",
    )
    .bind(material_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Material {}", material_id)))?;

    material_type
        .parse::<MaterialType>()
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Month-granular plans record a unit count of at least one
pub fn check_quantity(quantity: i32) -> AppResult<()> {
    check(shared::validate_plan_quantity(quantity), "quantity")
}

/// 409 when a natural key is already held by another row
pub fn ensure_key_free(taken: bool, entity: &str) -> AppResult<()> {
    if taken {
        return Err(AppError::DuplicateEntry(entity.to_string()));
    }
    Ok(())
}

/// Cascade-delete guard: 409 while any planning record refers to the row
pub fn ensure_unreferenced(in_use: bool, resource: &str, message_ru: &str) -> AppResult<()> {
    if in_use {
        return Err(AppError::Conflict {
            resource: resource.to_string(),
            message: format!("Cannot delete {} because it has related records", resource),
            message_ru: message_ru.to_string(),
        });
    }
    Ok(())
}

/// Purchases and write-offs move raw materials only
pub fn ensure_raw_material(material_type: MaterialType) -> AppResult<()> {
    if material_type != MaterialType::RawMaterial {
        return Err(AppError::invalid(
            "raw_material_id",
            "raw_material_id must reference a raw material",
        ));
    }
    Ok(())
}

/// A material on a technological card keeps its type, so the card's
/// finished/raw pairing stays valid
pub fn ensure_type_change_allowed(
    current: MaterialType,
    requested: MaterialType,
    on_card: bool,
) -> AppResult<()> {
    if current != requested && on_card {
        return Err(AppError::Conflict {
            resource: "material".to_string(),
            message: "Cannot change the type of a material used by a technological card"
                .to_string(),
            message_ru: "Нельзя изменить тип материала, используемого в технологической карте"
                .to_string(),
        });
    }
    Ok(())
}
