use super::*;

fn drain(clock: &mut VirtualClock<&'static str>, until: u64) -> Vec<(u64, &'static str)> {
    let mut out = Vec::new();
    clock.advance_to(TimeMs(until), |_, fired| out.push((fired.at.0, fired.payload)));
    out
}

#[test]
fn due_timers_fire_in_deadline_then_arm_order() {
    let mut clock = VirtualClock::new();
    clock.arm(20, "late");
    clock.arm(10, "first");
    clock.arm(10, "second");
    clock.arm(0, "now");

    assert_eq!(
        drain(&mut clock, 20),
        vec![(0, "now"), (10, "first"), (10, "second"), (20, "late")]
    );
    assert_eq!(clock.now(), TimeMs(20));
    assert_eq!(clock.pending(), 0);
}

#[test]
fn timers_past_the_horizon_stay_armed() {
    let mut clock = VirtualClock::new();
    let h = clock.arm(50, "later");
    assert!(drain(&mut clock, 49).is_empty());
    assert_eq!(clock.now(), TimeMs(49));
    assert!(clock.is_armed(h));
    assert_eq!(clock.next_deadline(), Some(TimeMs(50)));
    assert_eq!(drain(&mut clock, 50), vec![(50, "later")]);
}

#[test]
fn cancelled_timers_never_dispatch() {
    let mut clock = VirtualClock::new();
    let a = clock.arm(10, "a");
    clock.arm(20, "b");
    assert!(clock.cancel(a));
    assert!(!clock.cancel(a));
    assert_eq!(clock.next_deadline(), Some(TimeMs(20)));
    assert_eq!(drain(&mut clock, 100), vec![(20, "b")]);
}

#[test]
fn cancelling_a_fired_handle_is_a_noop() {
    let mut clock = VirtualClock::new();
    let a = clock.arm(5, "a");
    drain(&mut clock, 5);
    assert!(!clock.cancel(a));
}

#[test]
fn rearming_during_dispatch_catches_up_in_order() {
    let mut clock: VirtualClock<u32> = VirtualClock::new();
    clock.arm(10, 0);

    let mut seen = Vec::new();
    let n = clock.advance_to(TimeMs(45), |clock, fired| {
        seen.push((fired.at.0, fired.payload));
        assert_eq!(clock.now(), fired.at);
        if fired.payload < 5 {
            clock.arm(10, fired.payload + 1);
        }
    });

    assert_eq!(n, 4);
    assert_eq!(seen, vec![(10, 0), (20, 1), (30, 2), (40, 3)]);
    assert_eq!(clock.now(), TimeMs(45));
    assert_eq!(clock.next_deadline(), Some(TimeMs(50)));
}

#[test]
fn zero_delay_rearm_is_a_separate_dispatch() {
    let mut clock: VirtualClock<u32> = VirtualClock::new();
    clock.arm(0, 0);
    let mut seen = Vec::new();
    clock.advance_to(TimeMs(0), |clock, fired| {
        seen.push(fired.payload);
        if fired.payload < 3 {
            clock.arm(0, fired.payload + 1);
        }
    });
    assert_eq!(seen, vec![0, 1, 2, 3]);
}

#[test]
fn tagged_host_wraps_payloads() {
    #[derive(Debug, PartialEq)]
    enum Outer {
        Inner(u8),
    }

    let mut clock: VirtualClock<Outer> = VirtualClock::new();
    let h = {
        let mut host = crate::clock::timer::Tagged::new(&mut clock, Outer::Inner);
        host.arm(3, 7u8)
    };
    let fired = clock.pop_due(TimeMs(3)).unwrap();
    assert_eq!(fired.handle, h);
    assert_eq!(fired.payload, Outer::Inner(7));
}

#[test]
fn advance_by_is_relative_to_now() {
    let mut clock = VirtualClock::new();
    clock.arm(150, "tick");
    assert_eq!(clock.advance_by(100, |_, _| {}), 0);
    assert_eq!(clock.now(), TimeMs(100));
    assert_eq!(clock.advance_by(100, |_, _| {}), 1);
    assert_eq!(clock.now(), TimeMs(200));
}
