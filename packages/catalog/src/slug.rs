// ABOUTME: Slug allocation for catalog entities
// ABOUTME: Derives a slug from the name, appends -2, -3, ... until unused and retries lost insert races

use atelier_core::{slug_with_suffix, slugify};
use atelier_storage::{Assignment, Filter, Record, Repository, StorageResult};
use tracing::debug;

/// Inserts attempted before a slug conflict is surfaced to the caller
const MAX_SLUG_ATTEMPTS: u32 = 5;

/// Pick the first free slug for `name` in the record's table
pub(crate) async fn allocate_slug<R: Record>(repo: &Repository<R>, name: &str) -> StorageResult<String> {
    let base = slugify(name);
    let mut n = 1;

    loop {
        let candidate = slug_with_suffix(&base, n);
        let taken = repo
            .exists_where(&Filter::new().eq("slug", candidate.as_str()))
            .await?;

        if !taken {
            debug!("Allocated {} slug: {}", R::ENTITY, candidate);
            return Ok(candidate);
        }
        n += 1;
    }
}

/// Insert a record under a freshly allocated slug.
///
/// A concurrent writer can claim the same slug between allocation and
/// insert. The unique index rejects the loser, which then allocates again.
/// Unique violations on any other column are returned unchanged.
pub(crate) async fn create_with_slug<R, F>(repo: &Repository<R>, name: &str, build: F) -> StorageResult<R>
where
    R: Record,
    F: Fn(&str) -> Vec<Assignment<R::Field>>,
{
    let mut attempt = 1;

    loop {
        let slug = allocate_slug(repo, name).await?;

        match repo.create(build(&slug)).await {
            Err(err) if err.is_conflict_on("slug") && attempt < MAX_SLUG_ATTEMPTS => {
                debug!("{} slug {} was taken concurrently, retrying", R::ENTITY, slug);
                attempt += 1;
            }
            result => return result,
        }
    }
}
