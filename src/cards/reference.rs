//! The built-in catalog: eight English derbies.

use super::definition::{DerbyRecord, GroupId, TeamInfo};
use super::registry::DerbyCatalog;

const IMAGE_DIR: &str = "assets/images";

fn team(name: &str, image: &str) -> TeamInfo {
    TeamInfo::new(name, format!("{IMAGE_DIR}/{image}.png"))
}

fn derbies() -> Vec<DerbyRecord> {
    vec![
        DerbyRecord::new(
            GroupId::new(1),
            "North London Derby",
            team("Arsenal", "arsenal"),
            team("Tottenham", "tottenham"),
        )
        .with_history(
            "Geography and grievance. Arsenal began in south London and moved to Highbury in 1913, \
             right on Tottenham's doorstep. When the league was reorganised in 1919, Arsenal were \
             promoted to the First Division from fifth in the Second while Tottenham went down, \
             amid rumours of backroom politics.",
        ),
        DerbyRecord::new(
            GroupId::new(2),
            "Manchester Derby",
            team("Man City", "manchestercity"),
            team("Man United", "manchesterunited"),
        )
        .with_history(
            "Two clubs from the same industrial city. United dominated for decades, but City's rise \
             since the 2000s has made it one of the fiercest contests for the English title.",
        ),
        DerbyRecord::new(
            GroupId::new(3),
            "Merseyside Derby",
            team("Liverpool", "liverpool"),
            team("Everton", "everton"),
        )
        .with_history(
            "Named after the county of Merseyside. Both clubs once shared Anfield; Everton left \
             over a rent dispute and Liverpool FC was founded to fill the ground they left behind.",
        ),
        DerbyRecord::new(
            GroupId::new(4),
            "Tyne-Wear Derby",
            team("Newcastle", "newcastle"),
            team("Sunderland", "sunderland"),
        )
        .with_history(
            "Named after the rivers Tyne and Wear. The two north-east cities sit close together \
             and took opposite sides through the Civil War and the industrial age.",
        ),
        DerbyRecord::new(
            GroupId::new(5),
            "West London Derby",
            team("Chelsea", "chelsea"),
            team("Fulham", "fulham"),
        )
        .with_history(
            "Stamford Bridge and Craven Cottage are both in Hammersmith and Fulham, about two \
             kilometres apart.",
        ),
        DerbyRecord::new(
            GroupId::new(6),
            "Black Country Derby",
            team("West Brom", "westbromwichalbion"),
            team("Wolves", "wolverhampton"),
        )
        .with_history(
            "The West Midlands coalfields and ironworks blackened the sky and soil during the \
             industrial revolution, giving the region the name Black Country.",
        ),
        DerbyRecord::new(
            GroupId::new(7),
            "M23 Derby",
            team("Brighton", "brighton"),
            team("Crystal Palace", "crystalpalace"),
        )
        .with_history(
            "Unusually far apart for a derby. The rivalry began with promotion battles in the \
             Third Division in the 1970s and the media named it after the motorway linking the two. \
             Many fans simply call it a rivalry.",
        ),
        DerbyRecord::new(
            GroupId::new(8),
            "Steel City Derby",
            team("Sheffield United", "sheffieldunited"),
            team("Sheffield Wednesday", "sheffieldwednesday"),
        )
        .with_history(
            "Sheffield became world famous for steel during the industrial revolution, and the \
             city's two clubs contest the derby named after it.",
        ),
    ]
}

impl DerbyCatalog {
    /// The eight-derby catalog the game ships with.
    #[must_use]
    pub fn reference() -> Self {
        let records = derbies();
        debug_assert!(DerbyCatalog::new(records.clone()).is_ok());
        DerbyCatalog::from_trusted(records)
    }
}
