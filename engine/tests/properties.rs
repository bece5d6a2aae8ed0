//! Property tests for collection reducers.

use classboard_engine::{Action, CollectionState, Entity, User};
use proptest::prelude::*;
use std::collections::HashSet;

fn user(id: u64) -> User {
    User {
        id,
        name: format!("user {id}"),
        email: format!("u{id}@example.com"),
    }
}

/// Commands a store can settle. Created ids come from the service, which never
/// hands out an id twice, so creates use a fresh id.
#[derive(Debug, Clone)]
enum Step {
    List(Vec<u64>),
    Create,
    Update(u64),
    Delete(u64),
    Fail,
    ClearError,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        proptest::collection::hash_set(0u64..50, 0..10)
            .prop_map(|ids| Step::List(ids.into_iter().collect())),
        Just(Step::Create),
        (0u64..60).prop_map(Step::Update),
        (0u64..60).prop_map(Step::Delete),
        Just(Step::Fail),
        Just(Step::ClearError),
    ]
}

fn run(steps: &[Step]) -> Vec<CollectionState<User>> {
    let mut next_id = 1000;
    let mut state = CollectionState::<User>::new();
    let mut history = vec![state.clone()];

    for step in steps {
        let action = match step {
            Step::List(ids) => Action::Listed(ids.iter().copied().map(user).collect()),
            Step::Create => {
                next_id += 1;
                Action::Created(user(next_id))
            }
            Step::Update(id) => Action::Updated(user(*id)),
            Step::Delete(id) => Action::Deleted(*id),
            Step::Fail => Action::Failed("failed".into()),
            Step::ClearError => Action::ClearError,
        };
        state = state.apply(Action::Begin).apply(action);
        history.push(state.clone());
    }

    history
}

proptest! {
    #[test]
    fn ids_stay_unique(steps in proptest::collection::vec(step(), 0..40)) {
        for state in run(&steps) {
            let mut seen = HashSet::new();
            for record in state.items() {
                prop_assert!(seen.insert(*record.id()));
            }
        }
    }

    #[test]
    fn listing_replaces_exactly(
        prior in proptest::collection::vec(0u64..100, 0..20),
        listed in proptest::collection::vec(0u64..100, 0..20),
    ) {
        let state = CollectionState::with_items(prior.into_iter().map(user).collect());
        let expected: Vec<User> = listed.into_iter().map(user).collect();
        let state = state.apply(Action::Listed(expected.clone()));
        prop_assert_eq!(state.items(), expected.as_slice());
    }

    #[test]
    fn delete_keeps_relative_order(
        ids in proptest::collection::hash_set(0u64..100, 0..30),
        target in 0u64..100,
    ) {
        let ids: Vec<u64> = ids.into_iter().collect();
        let state = CollectionState::with_items(ids.iter().copied().map(user).collect())
            .apply(Action::Deleted(target));

        let expected: Vec<u64> = ids.into_iter().filter(|id| *id != target).collect();
        let actual: Vec<u64> = state.items().iter().map(|u| u.id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn failure_always_settles_with_error(steps in proptest::collection::vec(step(), 0..10)) {
        let last = run(&steps).pop().unwrap();
        let failed = last.apply(Action::Begin).apply(Action::Failed("x".into()));
        prop_assert!(!failed.is_loading());
        prop_assert_eq!(failed.error(), Some("x"));
        prop_assert_eq!(failed.items(), last.items());
        let cleared = failed.apply(Action::ClearError);
        prop_assert_eq!(cleared.error(), None);
    }
}
