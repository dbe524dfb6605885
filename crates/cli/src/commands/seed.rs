//! Seed command: create a demo household for local development.

use sqlx::PgPool;

use gripen_web::db::boxes::BoxRepository;
use gripen_web::db::profiles::ProfileRepository;
use gripen_web::db::rooms::RoomRepository;
use gripen_web::db::users::UserRepository;
use gripen_web::models::NewBoxItem;
use gripen_web::services::auth::AuthService;

use super::CommandError;

/// A demo box: number, description, and its items as
/// (name, quantity, category).
type DemoBox = (&'static str, &'static str, &'static [DemoItem]);
type DemoItem = (&'static str, i32, Option<&'static str>);

/// Demo rooms with their boxes. Loosely based on a real household inventory.
const DEMO_ROOMS: &[(&str, &[DemoBox])] = &[
    (
        "Living Room",
        &[
            (
                "1",
                "Media and cables",
                &[
                    ("HDMI cables", 4, Some("Electronics")),
                    ("Old DVD player", 1, Some("Electronics")),
                    ("Board games", 6, Some("Games")),
                ],
            ),
            (
                "2",
                "Books",
                &[("Paperbacks", 24, Some("Books")), ("Photo albums", 3, None)],
            ),
        ],
    ),
    (
        "Bedroom",
        &[(
            "5",
            "Spare bedding",
            &[
                ("Duvet covers", 4, Some("Textiles")),
                ("Pillows", 2, Some("Textiles")),
            ],
        )],
    ),
    (
        "Kitchen",
        &[(
            "8",
            "Seldom-used appliances",
            &[
                ("Waffle iron", 1, Some("Appliances")),
                ("Fondue set", 1, Some("Appliances")),
                ("Mason jars", 18, None),
            ],
        )],
    ),
    (
        "Basement",
        &[
            (
                "12",
                "Tools and hardware",
                &[
                    ("Drill", 1, Some("Tools")),
                    ("Screwdriver set", 1, Some("Tools")),
                    ("Assorted screws", 200, Some("Hardware")),
                ],
            ),
            (
                "13",
                "Camping gear",
                &[
                    ("Tent", 1, Some("Outdoor")),
                    ("Sleeping bags", 3, Some("Outdoor")),
                    ("Camp stove", 1, Some("Outdoor")),
                ],
            ),
        ],
    ),
    (
        "Attic",
        &[(
            "21",
            "Winter clothes",
            &[
                ("Wool sweaters", 8, Some("Clothing")),
                ("Ski jackets", 2, Some("Clothing")),
                ("Mystery scarf", 1, None),
            ],
        )],
    ),
];

/// Create a demo user, profile, rooms, and boxes.
pub async fn run(email: &str, password: &str) -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let user = AuthService::new(&pool)
        .register_with_password(email, password)
        .await?;
    tracing::info!(user_id = %user.id, email = %email, "Demo user created");

    UserRepository::new(&pool)
        .set_display_name(user.id, "Demo Resident")
        .await?;
    ProfileRepository::new(&pool)
        .create(user.id, "1 Demo Lane, Linköping")
        .await?;

    seed_inventory(&pool, user.id).await?;

    tracing::info!("Seed complete");
    Ok(())
}

async fn seed_inventory(
    pool: &PgPool,
    user_id: gripen_core::UserId,
) -> Result<(), CommandError> {
    let rooms = RoomRepository::new(pool);
    let boxes = BoxRepository::new(pool);

    for (room_name, demo_boxes) in DEMO_ROOMS {
        let room = rooms.create(user_id, room_name, None).await?;
        tracing::info!(room = %room_name, "Room created");

        for (box_number, description, demo_items) in *demo_boxes {
            let items: Vec<NewBoxItem> = demo_items
                .iter()
                .map(|(name, quantity, category)| NewBoxItem {
                    name: (*name).to_owned(),
                    quantity: *quantity,
                    category: category.map(str::to_owned),
                    description: None,
                })
                .collect();

            boxes
                .create(user_id, room.id, box_number, description, None, &items)
                .await?;
        }
    }

    Ok(())
}
