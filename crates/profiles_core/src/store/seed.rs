//! Bootstrap sample records used on first run.

use crate::model::profile::Profile;
use chrono::{DateTime, NaiveDate, Utc};

struct SeedRow {
    id: &'static str,
    full_name: &'static str,
    email: &'static str,
    phone_number: &'static str,
    bio: &'static str,
    avatar_url: &'static str,
    date_of_birth: (i32, u32, u32),
    location: &'static str,
}

const SEED_ROWS: [SeedRow; 4] = [
    SeedRow {
        id: "1",
        full_name: "Sarah Johnson",
        email: "sarah.johnson@example.com",
        phone_number: "+1 (555) 123-4567",
        bio: "Full-stack developer with a passion for creating intuitive user experiences. Love working with React, Node.js, and exploring new technologies.",
        avatar_url: "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=400",
        date_of_birth: (1990, 3, 15),
        location: "San Francisco, CA",
    },
    SeedRow {
        id: "2",
        full_name: "Michael Chen",
        email: "michael.chen@example.com",
        phone_number: "+1 (555) 987-6543",
        bio: "UX/UI Designer focused on creating meaningful digital experiences. Specializing in mobile-first design and accessibility.",
        avatar_url: "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg?auto=compress&cs=tinysrgb&w=400",
        date_of_birth: (1988, 7, 22),
        location: "New York, NY",
    },
    SeedRow {
        id: "3",
        full_name: "Emily Rodriguez",
        email: "emily.rodriguez@example.com",
        phone_number: "+1 (555) 456-7890",
        bio: "Product manager with 8+ years of experience in tech startups. Passionate about user-centered product development.",
        avatar_url: "https://images.pexels.com/photos/1036623/pexels-photo-1036623.jpeg?auto=compress&cs=tinysrgb&w=400",
        date_of_birth: (1985, 11, 8),
        location: "Austin, TX",
    },
    SeedRow {
        id: "4",
        full_name: "David Kim",
        email: "david.kim@example.com",
        phone_number: "+1 (555) 321-0987",
        bio: "DevOps engineer specializing in cloud infrastructure and automation. AWS certified with expertise in Docker and Kubernetes.",
        avatar_url: "https://images.pexels.com/photos/2182970/pexels-photo-2182970.jpeg?auto=compress&cs=tinysrgb&w=400",
        date_of_birth: (1992, 1, 30),
        location: "Seattle, WA",
    },
];

/// Returns the fixed four-record sample set stamped with `now`.
pub fn bootstrap_profiles(now: DateTime<Utc>) -> Vec<Profile> {
    SEED_ROWS
        .iter()
        .map(|row| {
            let (year, month, day) = row.date_of_birth;
            Profile {
                id: row.id.to_string(),
                full_name: row.full_name.to_string(),
                email: row.email.to_string(),
                phone_number: Some(row.phone_number.to_string()),
                bio: Some(row.bio.to_string()),
                avatar_url: Some(row.avatar_url.to_string()),
                date_of_birth: NaiveDate::from_ymd_opt(year, month, day),
                location: Some(row.location.to_string()),
                created_at: now,
                updated_at: now,
            }
        })
        .collect()
}
