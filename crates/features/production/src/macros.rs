/// Named shortcuts for `self.apply(tree, Transition::X)` on a lifecycle handle.
macro_rules! transition_shortcuts {
    ($($name:ident => $transition:ident),* $(,)?) => {
        $(
            #[doc = concat!("Applies [`Transition::", stringify!($transition), "`].")]
            pub fn $name(self, tree: &mut ::twin_model::Tree) -> bool {
                self.apply(tree, ::twin_model::Transition::$transition)
            }
        )*
    };
}

/// Plan-level shortcuts that address a step (and optionally an action) by idShort.
macro_rules! plan_shortcuts {
    (steps { $($step:ident => $step_transition:ident),* $(,)? }
     actions { $($action:ident => $action_transition:ident),* $(,)? }) => {
        $(
            #[doc = concat!("Applies [`Transition::", stringify!($step_transition), "`] to the named step.")]
            pub fn $step(&mut self, step: &str) -> bool {
                self.apply_step(step, ::twin_model::Transition::$step_transition)
            }
        )*
        $(
            #[doc = concat!("Applies [`Transition::", stringify!($action_transition), "`] to the named action.")]
            pub fn $action(&mut self, step: &str, action: &str) -> bool {
                self.apply_action(step, action, ::twin_model::Transition::$action_transition)
            }
        )*
    };
}
