use flappy_bird::timer::Timer;

#[test]
fn new_timer_is_stopped_and_never_fires() {
    let mut t = Timer::new(16);
    assert!(!t.is_running());
    assert_eq!(t.advance(1_000), 0);
}

#[test]
fn fires_once_per_elapsed_period() {
    let mut t = Timer::new(16);
    t.start();
    assert_eq!(t.advance(15), 0);
    assert_eq!(t.advance(1), 1);
    assert_eq!(t.advance(50), 3);
    assert_eq!(t.elapsed_ms, 2); // remainder carried
    assert_eq!(t.advance(14), 1);
}

#[test]
fn stop_discards_progress() {
    let mut t = Timer::new(100);
    t.start();
    t.advance(90);
    t.stop();
    assert_eq!(t.advance(50), 0);
    t.start();
    assert_eq!(t.advance(50), 0); // full delay again
    assert_eq!(t.advance(50), 1);
}

#[test]
fn start_while_running_keeps_progress() {
    let mut t = Timer::new(100);
    t.start();
    t.advance(90);
    t.start();
    assert_eq!(t.advance(10), 1);
}

#[test]
fn zero_period_is_clamped() {
    let mut t = Timer::new(0);
    t.start();
    assert_eq!(t.advance(3), 3);
}
