//! Role and student-record seeding.

use std::time::Instant;

use chrono::{DateTime, Utc};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use rollgate_db::postgres::PgRoleStore;
use rollgate_models::{NewStudent, Role, RollWindow};
use sqlx::PgPool;

/// Roles registration can be configured to assign.
const SEED_ROLES: [(&str, &str, &str); 1] = [(
    "Student",
    "student",
    "Default role given to self-registered students",
)];

pub async fn seed_roles(db: &PgPool) -> Result<Vec<Role>, Box<dyn std::error::Error>> {
    let store = PgRoleStore::new(db.clone());
    let mut roles = Vec::with_capacity(SEED_ROLES.len());

    for (name, role_type, description) in SEED_ROLES {
        roles.push(store.ensure_role(name, role_type, Some(description)).await?);
    }

    Ok(roles)
}

/// Fake student records whose rolls fall inside the admission window for `now`.
pub fn generate_students(count: usize, domain: &str, now: DateTime<Utc>) -> Vec<NewStudent> {
    let codes = RollWindow::for_date(&now).codes();
    let mut rng = rand::thread_rng();

    (0..count)
        .map(|_| {
            let code = codes[rng.gen_range(0..codes.len())];
            let roll = format!("{:02}{:05}", code, rng.gen_range(0..100_000));

            let first: String = FirstName().fake();
            let last: String = LastName().fake();
            let institutional_email = format!(
                "{}.{}{}@{}",
                email_safe(&first),
                email_safe(&last),
                &roll[2..],
                domain
            );

            NewStudent {
                roll,
                institutional_email,
            }
        })
        .collect()
}

fn email_safe(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

/// Inserts generated records. Rolls already present are skipped, so the
/// returned count can be lower than `count`.
pub async fn seed_students(
    db: &PgPool,
    count: usize,
    domain: &str,
    now: DateTime<Utc>,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} student records...", count);

    let students = generate_students(count, domain, now);
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    // 2 params per record
    const BATCH_SIZE: usize = 1000;

    for chunk in students.chunks(BATCH_SIZE) {
        let mut query = String::from("INSERT INTO students (roll, institutional_email) VALUES ");
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            query.push_str(&format!("(${}, ${})", i * 2 + 1, i * 2 + 2));
        }
        query.push_str(" ON CONFLICT (roll) DO NOTHING");

        let mut q = sqlx::query(&query);
        for student in chunk {
            q = q.bind(&student.roll).bind(&student.institutional_email);
        }
        inserted += q.execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} student records in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}
