use crate::simulation::{Dispatch, Simulation};

/// Simulation execution trait.
pub trait Execute {
    /// Executes the simulation until some stopping condition is reached.
    /// The condition is implementation-specific.
    fn execute(self, sim: &mut Simulation);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndCondition {
    Horizon,
    Steps(usize),
}

/// Executor is used for simple execution of an entire simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executor {
    end_condition: EndCondition,
}

impl Executor {
    /// Run until no event remains strictly before the horizon.
    #[must_use]
    pub fn until_horizon() -> Self {
        Self {
            end_condition: EndCondition::Horizon,
        }
    }

    /// Dispatch at most this many events, stopping early at the horizon.
    #[must_use]
    pub fn steps(steps: usize) -> Self {
        Self {
            end_condition: EndCondition::Steps(steps),
        }
    }

    /// Registers a side effect that is called _after_ each dispatched event.
    #[must_use]
    pub fn side_effect<F>(self, func: F) -> ExecutorWithSideEffect<F>
    where
        F: FnMut(&Simulation, &Dispatch),
    {
        ExecutorWithSideEffect {
            end_condition: self.end_condition,
            side_effect: func,
        }
    }
}

impl Execute for Executor {
    fn execute(self, sim: &mut Simulation) {
        run_with(sim, self.end_condition, |_, _| {});
    }
}

pub struct ExecutorWithSideEffect<F>
where
    F: FnMut(&Simulation, &Dispatch),
{
    end_condition: EndCondition,
    side_effect: F,
}

impl<F> Execute for ExecutorWithSideEffect<F>
where
    F: FnMut(&Simulation, &Dispatch),
{
    fn execute(self, sim: &mut Simulation) {
        run_with(sim, self.end_condition, self.side_effect);
    }
}

fn run_with<F>(sim: &mut Simulation, end_condition: EndCondition, mut side_effect: F)
where
    F: FnMut(&Simulation, &Dispatch),
{
    let mut step = |sim: &mut Simulation| match sim.step() {
        Some(dispatch) => {
            side_effect(sim, &dispatch);
            true
        }
        None => false,
    };
    match end_condition {
        EndCondition::Horizon => while step(sim) {},
        EndCondition::Steps(steps) => {
            for _ in 0..steps {
                if !step(sim) {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::SimulationConfig;

    #[test]
    fn test_create_executor() {
        assert_eq!(
            Executor::until_horizon(),
            Executor {
                end_condition: EndCondition::Horizon
            }
        );
        assert_eq!(
            Executor::steps(7),
            Executor {
                end_condition: EndCondition::Steps(7)
            }
        );
    }

    #[test]
    fn test_steps() {
        let config = SimulationConfig::mm1(0.5, 1.0, 1_000.0).with_seed(5);
        let mut sim = Simulation::new(&config).unwrap();
        let mut seen = 0;
        Executor::steps(10)
            .side_effect(|_, _| seen += 1)
            .execute(&mut sim);
        assert_eq!(seen, 10);
    }

    #[test]
    fn test_steps_stops_at_horizon() {
        let mut sim = Simulation::new(&SimulationConfig::mm1(0.5, 1.0, 0.0)).unwrap();
        let mut seen = 0;
        Executor::steps(100)
            .side_effect(|_, _| seen += 1)
            .execute(&mut sim);
        assert_eq!(seen, 0);
        assert!(sim.is_finished());
    }

    #[test]
    fn test_until_horizon() {
        let config = SimulationConfig::md1(0.5, 1.0, 200.0).with_seed(9);
        let mut sim = Simulation::new(&config).unwrap();
        let mut last = None;
        Executor::until_horizon()
            .side_effect(|sim, dispatch| {
                assert!(dispatch.event.time < sim.horizon());
                last = Some(dispatch.event.time);
            })
            .execute(&mut sim);
        assert!(sim.is_finished());
        assert_eq!(last, Some(sim.time()));
    }
}
