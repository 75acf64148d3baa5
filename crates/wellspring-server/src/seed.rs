//! Demo data for local development.

use tracing::info;
use wellspring_core::error::{WellspringError, WellspringResult};
use wellspring_core::models::session::CreateSession;
use wellspring_core::models::user::{CreateUser, User};
use wellspring_core::repository::{SessionRepository, UserRepository};

pub const DEMO_PASSWORD: &str = "demo123";

pub const DEMO_USERS: [&str; 3] = [
    "demo@wellness.com",
    "instructor@wellness.com",
    "admin@wellness.com",
];

struct SeedSession {
    owner: usize,
    title: &'static str,
    tags: &'static [&'static str],
    json_file_url: &'static str,
    published: bool,
}

// Oldest first, so the catalog lists them newest first.
const SEED_SESSIONS: &[SeedSession] = &[
    SeedSession {
        owner: 2,
        title: "Breathing Techniques",
        tags: &["breathing", "pranayama", "meditation", "beginner"],
        json_file_url: "https://example.com/sessions/breathing.json",
        published: true,
    },
    SeedSession {
        owner: 2,
        title: "Power Vinyasa Flow",
        tags: &["yoga", "power", "strength", "intermediate"],
        json_file_url: "https://example.com/sessions/power-vinyasa.json",
        published: true,
    },
    SeedSession {
        owner: 1,
        title: "Evening Wind Down",
        tags: &["relaxation", "evening", "sleep", "breathing"],
        json_file_url: "https://example.com/sessions/evening-winddown.json",
        published: true,
    },
    SeedSession {
        owner: 1,
        title: "Mindfulness Meditation",
        tags: &["meditation", "mindfulness", "relaxation", "stress-relief"],
        json_file_url: "https://example.com/sessions/mindfulness.json",
        published: true,
    },
    SeedSession {
        owner: 1,
        title: "Morning Yoga Flow",
        tags: &["yoga", "morning", "flexibility", "beginner"],
        json_file_url: "https://example.com/sessions/morning-yoga.json",
        published: true,
    },
    SeedSession {
        owner: 1,
        title: "Advanced Meditation Series",
        tags: &["meditation", "advanced", "series"],
        json_file_url: "https://example.com/sessions/advanced-meditation.json",
        published: false,
    },
    SeedSession {
        owner: 0,
        title: "My Personal Practice",
        tags: &["personal", "custom"],
        json_file_url: "",
        published: false,
    },
];

/// Insert the demo users and sessions.
///
/// Users that already exist are reused. The `seed` command purges the
/// store first, so repeated runs start from the same data.
pub async fn seed_demo_data<U, S>(users: &U, sessions: &S) -> WellspringResult<()>
where
    U: UserRepository,
    S: SessionRepository,
{
    let mut owners: Vec<User> = Vec::with_capacity(DEMO_USERS.len());
    for email in DEMO_USERS {
        let user = match users.get_by_email(email).await {
            Ok(existing) => existing,
            Err(WellspringError::NotFound { .. }) => {
                users
                    .create(CreateUser {
                        email: email.to_string(),
                        password: DEMO_PASSWORD.to_string(),
                    })
                    .await?
            }
            Err(e) => return Err(e),
        };
        owners.push(user);
    }

    let mut published = 0usize;
    for seed in SEED_SESSIONS {
        let session = sessions
            .create(CreateSession {
                owner_id: owners[seed.owner].id,
                title: seed.title.to_string(),
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
                json_file_url: seed.json_file_url.to_string(),
            })
            .await?;
        if seed.published {
            sessions.mark_published(session.id).await?;
            published += 1;
        }
    }

    info!(
        users = owners.len(),
        sessions = SEED_SESSIONS.len(),
        published,
        "Seeded demo data"
    );
    Ok(())
}
