use web_time::Duration;

use crate::{AnimationPreferences, CubeEvent, CubeSimulation};


/// Frame time used by the scenario tests.
const FRAME: Duration = Duration::from_millis(16);

fn new_simulation(seed: u64) -> CubeSimulation<Vec<CubeEvent>> {
    CubeSimulation::with_seed(AnimationPreferences::default(), vec![], seed)
}

fn count(events: &[CubeEvent], f: impl Fn(&CubeEvent) -> bool) -> usize {
    events.iter().filter(|e| f(e)).count()
}
