// Gym pipeline: base merge plus the dependent detail joins

use std::collections::HashMap;

use tracing::error;

use backend_domain::{Gym, GymOccupant, GymPokemon, MapFilter};

use crate::dtos::MapRequest;
use crate::AppError;
use crate::AppState;

/// Base gym fetch (same two-path merge as the other types) followed by
/// the raid and occupant joins. The result only reaches the aggregator
/// once every join has completed.
pub(crate) async fn fetch_gym_part(
    state: &AppState,
    request: &MapRequest,
    new_area: bool,
) -> Result<Option<HashMap<String, Gym>>, AppError> {
    if !request.show_gyms {
        return Ok(None);
    }
    let limit = state.config.gym_limit;

    let rows = if !request.last_gyms {
        let filter = MapFilter::within(request.bounds, limit);
        fetch_gyms(state, &filter).await?
    } else {
        let filter = MapFilter::within(request.bounds, limit).updated_after(request.timestamp);
        let mut rows = fetch_gyms(state, &filter).await?;
        if new_area {
            if let Some(prev) = request.prev_bounds {
                let supplemental = filter.clone().exclude_area(prev);
                rows.extend(fetch_gyms(state, &supplemental).await?);
            }
        }
        rows
    };

    let gyms = attach_details(state, rows).await?;
    Ok(Some(gyms))
}

async fn fetch_gyms(state: &AppState, filter: &MapFilter) -> Result<Vec<Gym>, AppError> {
    state.gym_repo.fetch_gyms(filter).await.map_err(|err| {
        error!("failed to fetch gyms: {}", err);
        state.metrics.record_store_error();
        AppError::Internal(err)
    })
}

/// Attach the zero-or-one raid per gym and the occupant list. Occupant
/// details are keyed by the member rows' `pokemon_uid`, not by gym id,
/// so the gym-to-detail path resolves through the member rows. Gyms
/// without occupants keep an empty list.
pub async fn attach_details(
    state: &AppState,
    rows: Vec<Gym>,
) -> Result<HashMap<String, Gym>, AppError> {
    let mut by_id: HashMap<String, Gym> = rows
        .into_iter()
        .map(|gym| (gym.gym_id.clone(), gym))
        .collect();
    if by_id.is_empty() {
        return Ok(by_id);
    }
    let gym_ids: Vec<String> = by_id.keys().cloned().collect();

    let raids = state.gym_repo.fetch_raids(&gym_ids).await.map_err(|err| {
        error!("failed to fetch raids: {}", err);
        state.metrics.record_store_error();
        AppError::Internal(err)
    })?;
    for raid in raids {
        if let Some(gym) = by_id.get_mut(&raid.gym_id) {
            gym.event = Some(raid);
        }
    }

    let members = state.gym_repo.fetch_members(&gym_ids).await.map_err(|err| {
        error!("failed to fetch gym members: {}", err);
        state.metrics.record_store_error();
        AppError::Internal(err)
    })?;

    let uids: Vec<String> = members.iter().map(|m| m.pokemon_uid.clone()).collect();
    let details = if uids.is_empty() {
        Vec::new()
    } else {
        state
            .gym_repo
            .fetch_member_details(&uids)
            .await
            .map_err(|err| {
                error!("failed to fetch gym member details: {}", err);
                state.metrics.record_store_error();
                AppError::Internal(err)
            })?
    };
    let detail_by_uid: HashMap<&str, &GymPokemon> = details
        .iter()
        .map(|detail| (detail.pokemon_uid.as_str(), detail))
        .collect();

    for member in members {
        let gym_id = member.gym_id.clone();
        let detail = detail_by_uid.get(member.pokemon_uid.as_str()).copied();
        if let Some(gym) = by_id.get_mut(&gym_id) {
            gym.occupants.push(GymOccupant::from_parts(member, detail));
        }
    }

    Ok(by_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::testing::{gym, gyms_by_id, state_with, GymRepoStub, PokemonRepoStub, PokestopRepoStub};
    use backend_domain::{GymMember, GymPokemon, RaidEvent};

    fn member(gym_id: &str, uid: &str) -> GymMember {
        GymMember {
            gym_id: gym_id.to_string(),
            pokemon_uid: uid.to_string(),
            deployed_at: 1_700_000_000_000,
            last_seen: 1_700_000_100_000,
            cp_decayed: 1500,
        }
    }

    fn detail(uid: &str, pokemon_id: i32) -> GymPokemon {
        GymPokemon {
            pokemon_uid: uid.to_string(),
            pokemon_id,
            cp: 2500,
            move_1: Some(251),
            move_2: Some(14),
            iv_attack: Some(15),
            iv_defense: Some(14),
            iv_stamina: Some(13),
        }
    }

    fn raid(gym_id: &str) -> RaidEvent {
        RaidEvent {
            gym_id: gym_id.to_string(),
            level: 4,
            spawn: 1_700_000_000_000,
            start: 1_700_000_600_000,
            end: 1_700_003_600_000,
            pokemon_id: Some(248),
            cp: Some(37599),
            move_1: Some(241),
            move_2: Some(69),
            last_scanned: 1_700_000_000_000,
        }
    }

    #[tokio::test]
    async fn gym_without_occupants_gets_empty_list_not_missing_key() {
        let repo = GymRepoStub::with_data(vec![gym("a")], Vec::new(), Vec::new(), Vec::new());
        let state = state_with(PokemonRepoStub::default(), PokestopRepoStub::default(), repo);

        let gyms = attach_details(&state, vec![gym("a")]).await.expect("join");
        let gym_a = gyms_by_id(&gyms, "a");
        assert!(gym_a.event.is_none());
        assert!(gym_a.occupants.is_empty());
    }

    #[tokio::test]
    async fn raid_attaches_to_matching_gym_only() {
        let repo = GymRepoStub::with_data(
            vec![gym("a"), gym("b")],
            vec![raid("b")],
            Vec::new(),
            Vec::new(),
        );
        let state = state_with(PokemonRepoStub::default(), PokestopRepoStub::default(), repo);

        let gyms = attach_details(&state, vec![gym("a"), gym("b")])
            .await
            .expect("join");
        assert!(gyms_by_id(&gyms, "a").event.is_none());
        let event = gyms_by_id(&gyms, "b").event.expect("raid attached");
        assert_eq!(event.level, 4);
    }

    #[tokio::test]
    async fn occupant_details_resolve_through_member_uids() {
        let repo = GymRepoStub::with_data(
            vec![gym("a")],
            Vec::new(),
            vec![member("a", "uid-1"), member("a", "uid-2")],
            vec![detail("uid-1", 143), detail("uid-2", 248)],
        );
        let state = state_with(
            PokemonRepoStub::default(),
            PokestopRepoStub::default(),
            repo.clone(),
        );

        let gyms = attach_details(&state, vec![gym("a")]).await.expect("join");
        let gym_a = gyms_by_id(&gyms, "a");
        assert_eq!(gym_a.occupants.len(), 2);
        let ids: Vec<Option<i32>> = gym_a.occupants.iter().map(|o| o.pokemon_id).collect();
        assert!(ids.contains(&Some(143)) && ids.contains(&Some(248)));

        // The detail fetch is keyed by the member uids, not gym ids.
        let detail_calls = repo.detail_calls();
        assert_eq!(detail_calls.len(), 1);
        assert_eq!(detail_calls[0], vec!["uid-1".to_string(), "uid-2".to_string()]);
    }

    #[tokio::test]
    async fn missing_detail_row_keeps_occupant_with_empty_details() {
        let repo = GymRepoStub::with_data(
            vec![gym("a")],
            Vec::new(),
            vec![member("a", "uid-1")],
            Vec::new(),
        );
        let state = state_with(PokemonRepoStub::default(), PokestopRepoStub::default(), repo);

        let gyms = attach_details(&state, vec![gym("a")]).await.expect("join");
        let gym_a = gyms_by_id(&gyms, "a");
        assert_eq!(gym_a.occupants.len(), 1);
        assert!(gym_a.occupants[0].pokemon_id.is_none());
        assert_eq!(gym_a.occupants[0].cp_decayed, 1500);
    }

    #[tokio::test]
    async fn no_gyms_skips_every_join_fetch() {
        let repo = GymRepoStub::default();
        let state = state_with(
            PokemonRepoStub::default(),
            PokestopRepoStub::default(),
            repo.clone(),
        );

        let gyms = attach_details(&state, Vec::new()).await.expect("join");
        assert!(gyms.is_empty());
        assert!(repo.detail_calls().is_empty());
    }
}
