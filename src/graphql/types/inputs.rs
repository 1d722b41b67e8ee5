use async_graphql::*;
use tokio::io::AsyncReadExt;

use crate::errors::{ImageStoreError, RecipeError};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::{recipe_error_to_graphql_error, StructuredError};
use crate::images::ImageUpload;
use crate::services::{CreateRecipeRequest, UpdateRecipeRequest};

#[derive(InputObject)]
pub struct CreateRecipeInput {
    pub name: String,
    pub cuisine: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    /// Image file sent as a GraphQL multipart upload; replaces `imageUrl`
    pub image: Option<Upload>,
    pub blurb: Option<String>,
    pub category_id: Option<String>,
}

impl CreateRecipeInput {
    pub async fn into_request(self, ctx: &Context<'_>) -> Result<CreateRecipeRequest> {
        let image = match &self.image {
            Some(upload) => Some(read_upload(ctx, upload).await?),
            None => None,
        };

        Ok(CreateRecipeRequest {
            name: self.name,
            cuisine: self.cuisine,
            content: self.content,
            image_url: self.image_url,
            image,
            blurb: self.blurb,
            category_id: self.category_id,
        })
    }
}

/// Every field is optional. Nullable columns distinguish an omitted field
/// (left untouched) from an explicit `null` (cleared).
#[derive(InputObject)]
pub struct UpdateRecipeInput {
    pub name: Option<String>,
    pub cuisine: MaybeUndefined<String>,
    pub content: Option<String>,
    pub image_url: MaybeUndefined<String>,
    pub image: Option<Upload>,
    pub blurb: MaybeUndefined<String>,
    pub category_id: MaybeUndefined<String>,
}

impl UpdateRecipeInput {
    pub async fn into_request(self, ctx: &Context<'_>) -> Result<UpdateRecipeRequest> {
        let image = match &self.image {
            Some(upload) => Some(read_upload(ctx, upload).await?),
            None => None,
        };

        Ok(UpdateRecipeRequest {
            name: self.name,
            cuisine: tri_state(self.cuisine),
            content: self.content,
            image_url: tri_state(self.image_url),
            image,
            blurb: tri_state(self.blurb),
            category_id: tri_state(self.category_id),
        })
    }
}

fn tri_state<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(value) => Some(Some(value)),
    }
}

/// Load an uploaded file, refusing anything over the configured limit
/// before its contents are read
async fn read_upload(ctx: &Context<'_>, upload: &Upload) -> Result<ImageUpload> {
    let max_bytes = ctx.data::<GraphQLContext>()?.max_upload_bytes;
    let value = upload
        .value(ctx)
        .map_err(|e| StructuredError::bad_request(format!("Invalid image upload: {}", e)))?;

    let filename = value.filename;
    let content_type = value.content_type;
    let mut file = tokio::fs::File::from_std(value.content);

    let size = file
        .metadata()
        .await
        .map_err(|e| StructuredError::bad_request(format!("Invalid image upload: {}", e)))?
        .len();
    let size = usize::try_from(size).unwrap_or(usize::MAX);
    if size > max_bytes {
        return Err(recipe_error_to_graphql_error(RecipeError::from(
            ImageStoreError::TooLarge {
                size,
                max: max_bytes,
            },
        )));
    }

    let mut bytes = Vec::with_capacity(size);
    file.read_to_end(&mut bytes)
        .await
        .map_err(|e| StructuredError::bad_request(format!("Failed to read image upload: {}", e)))?;

    let image = ImageUpload::new(filename, bytes);
    Ok(match content_type {
        Some(content_type) => image.with_content_type(content_type),
        None => image,
    })
}
