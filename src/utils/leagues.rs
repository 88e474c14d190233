use crate::api::Fixture;

pub const LIGA_PROFESIONAL_ARGENTINA: u32 = 128;
pub const COPA_LIBERTADORES: u32 = 13;
pub const COPA_SUDAMERICANA: u32 = 11;
pub const PREMIER_LEAGUE: u32 = 39;
pub const CHAMPIONS_LEAGUE: u32 = 2;
pub const FA_CUP: u32 = 45;
pub const CARABAO_CUP: u32 = 48;

/// API-Football league ids shown on the dashboard
pub const ALLOWED_LEAGUES: [u32; 7] = [
    LIGA_PROFESIONAL_ARGENTINA,
    COPA_LIBERTADORES,
    COPA_SUDAMERICANA,
    PREMIER_LEAGUE,
    CHAMPIONS_LEAGUE,
    FA_CUP,
    CARABAO_CUP,
];

/// Keep only fixtures whose league is in `allowed`, in their original order
pub fn filter_leagues(fixtures: Vec<Fixture>, allowed: &[u32]) -> Vec<Fixture> {
    fixtures
        .into_iter()
        .filter(|f| allowed.contains(&f.league.id))
        .collect()
}
