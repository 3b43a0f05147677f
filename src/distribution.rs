use rand::Rng;
use tracing::debug;

pub const DAYS: usize = 365;
pub const MIN_AMOUNT: u32 = 5;
pub const MAX_AMOUNT: u32 = 100;
pub const STEP: u32 = 5;

pub const MIN_GOAL: u32 = DAYS as u32 * MIN_AMOUNT;
pub const MAX_GOAL: u32 = DAYS as u32 * MAX_AMOUNT;

/// Upper bound on random draws before the remainder is filled greedily.
/// Feasible goals need a few tens of thousands of draws at most.
const MAX_DRAWS: usize = 1_000_000;

/// Splits `goal` into [`DAYS`] amounts between [`MIN_AMOUNT`] and
/// [`MAX_AMOUNT`], each a multiple of [`STEP`], summing exactly to `goal`.
///
/// Every slot starts at the minimum, then the leftover is handed out one step
/// at a time to slots drawn uniformly with replacement; a draw that lands on a
/// full slot is discarded. Returns an empty vector when the goal cannot be
/// met.
pub fn distribute<R: Rng>(goal: i64, rng: &mut R) -> Vec<u32> {
    let Some(mut leftover) = leftover_for(goal) else {
        return Vec::new();
    };

    let mut amounts = vec![MIN_AMOUNT; DAYS];
    let mut draws = 0;
    while leftover > 0 && draws < MAX_DRAWS {
        draws += 1;
        let slot = &mut amounts[rng.gen_range(0..DAYS)];
        if *slot < MAX_AMOUNT {
            *slot += STEP;
            leftover -= STEP;
        }
    }

    if leftover > 0 {
        debug!(leftover, draws, "draw ceiling reached, filling remainder");
        fill_remainder(&mut amounts, leftover);
    }

    amounts
}

fn leftover_for(goal: i64) -> Option<u32> {
    let leftover = goal.checked_sub(i64::from(MIN_GOAL))?;
    let capacity = i64::from(MAX_GOAL - MIN_GOAL);
    if leftover < 0 || leftover % i64::from(STEP) != 0 || leftover > capacity {
        return None;
    }
    u32::try_from(leftover).ok()
}

fn fill_remainder(amounts: &mut [u32], mut leftover: u32) {
    for slot in amounts.iter_mut() {
        if leftover == 0 {
            break;
        }
        let grant = (MAX_AMOUNT - *slot).min(leftover);
        *slot += grant;
        leftover -= grant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, prop_assume, proptest};
    use rand::{SeedableRng, rngs::StdRng};

    fn assert_valid(amounts: &[u32], goal: u32) {
        assert_eq!(amounts.len(), DAYS);
        assert!(
            amounts
                .iter()
                .all(|&a| (MIN_AMOUNT..=MAX_AMOUNT).contains(&a) && a % STEP == 0),
            "amount out of bounds"
        );
        assert_eq!(amounts.iter().sum::<u32>(), goal);
    }

    #[test]
    fn minimum_goal_is_all_fives() {
        let mut rng = StdRng::seed_from_u64(1);
        let amounts = distribute(i64::from(MIN_GOAL), &mut rng);
        assert_eq!(amounts, vec![5; DAYS]);
    }

    #[test]
    fn maximum_goal_is_all_hundreds() {
        let mut rng = StdRng::seed_from_u64(2);
        let amounts = distribute(i64::from(MAX_GOAL), &mut rng);
        assert_eq!(amounts, vec![100; DAYS]);
    }

    #[test]
    fn near_maximum_goal_terminates() {
        let mut rng = StdRng::seed_from_u64(3);
        let goal = MAX_GOAL - STEP;
        let amounts = distribute(i64::from(goal), &mut rng);
        assert_valid(&amounts, goal);
        assert_eq!(amounts.iter().filter(|&&a| a == 95).count(), 1);
    }

    #[test]
    fn infeasible_goals_are_empty() {
        let mut rng = StdRng::seed_from_u64(4);
        for goal in [
            -5,
            0,
            1820,
            1826,
            1831,
            36_505,
            36_499,
            i64::MIN,
            i64::MAX,
        ] {
            assert!(distribute(goal, &mut rng).is_empty(), "goal {goal}");
        }
    }

    #[test]
    fn same_seed_same_allocation() {
        let first = distribute(10_000, &mut StdRng::seed_from_u64(42));
        let second = distribute(10_000, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_calls_are_each_valid() {
        let first = distribute(18_250, &mut rand::thread_rng());
        let second = distribute(18_250, &mut rand::thread_rng());
        assert_valid(&first, 18_250);
        assert_valid(&second, 18_250);
    }

    struct StuckRng;

    impl rand::RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn stuck_generator_still_terminates() {
        let amounts = distribute(20_000, &mut StuckRng);
        assert_valid(&amounts, 20_000);
        assert_eq!(amounts[0], MAX_AMOUNT);
    }

    #[test]
    fn remainder_pass_fills_to_cap() {
        let mut amounts = vec![MIN_AMOUNT; DAYS];
        fill_remainder(&mut amounts, 200);
        assert_eq!(amounts[0], 100);
        assert_eq!(amounts[1], 100);
        assert_eq!(amounts[2], 20);
        assert_eq!(amounts.iter().sum::<u32>(), MIN_GOAL + 200);
    }

    #[test]
    fn feasibility_matches_range_and_step() {
        assert_eq!(leftover_for(1825), Some(0));
        assert_eq!(leftover_for(36_500), Some(34_675));
        assert_eq!(leftover_for(10_000), Some(8_175));
        assert_eq!(leftover_for(10_001), None);
        assert_eq!(leftover_for(1820), None);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_feasible_goals_produce_valid_allocations(
            seed in any::<u64>(),
            steps in 0u32..=(MAX_GOAL - MIN_GOAL) / STEP,
        ) {
            let goal = MIN_GOAL + steps * STEP;
            let amounts = distribute(i64::from(goal), &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(amounts.len(), DAYS);
            prop_assert!(amounts.iter().all(|&a| (MIN_AMOUNT..=MAX_AMOUNT).contains(&a)));
            prop_assert!(amounts.iter().all(|&a| a % STEP == 0));
            prop_assert_eq!(amounts.iter().sum::<u32>(), goal);
        }

        #[test]
        fn prop_off_step_goals_are_rejected(
            seed in any::<u64>(),
            goal in i64::from(MIN_GOAL)..=i64::from(MAX_GOAL),
        ) {
            let amounts = distribute(goal, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(amounts.is_empty(), goal % i64::from(STEP) != 0);
        }

        #[test]
        fn prop_out_of_range_goals_are_rejected(goal in any::<i64>()) {
            prop_assume!(!(i64::from(MIN_GOAL)..=i64::from(MAX_GOAL)).contains(&goal));
            prop_assert!(distribute(goal, &mut StdRng::seed_from_u64(0)).is_empty());
        }
    }
}
