//! Whole-match scenarios on the classic stadium

use discball::bots::{Bot, ChaseBot, GoalkeeperBot, collect_actions};
use discball::sim::CollisionFlag;
use discball::{Action, BaseMap, Game, GamePhase, Score, Team};
use glam::DVec2;

const IDLE2: [Action; 2] = [Action::IDLE, Action::IDLE];

fn classic(score: Score) -> Game {
    let mut game = Game::with_players(
        BaseMap::Classic.load().unwrap(),
        score,
        [("red", Team::Red), ("blue", Team::Blue)],
    );
    game.start();
    game
}

/// Roll the ball into blue's goal above the blue player
fn shoot_at_blue_goal(game: &mut Game) -> usize {
    game.ball_mut().position = DVec2::new(0.0, 40.0);
    game.ball_mut().velocity = DVec2::new(10.0, 0.0);
    for tick in 1..=100 {
        assert!(!game.step(&IDLE2));
        if tick == 1 {
            assert_eq!(game.state(), GamePhase::Playing);
        }
        if game.state() == GamePhase::Goal {
            return tick;
        }
    }
    panic!("no goal within 100 ticks, ball at {}", game.ball().position);
}

#[test]
fn test_moving_ball_opens_play_on_first_tick() {
    let mut game = classic(Score::new(0, 1));
    assert_eq!(game.state(), GamePhase::Kickoff);
    game.ball_mut().velocity = DVec2::new(1.0, 0.0);
    assert!(!game.step(&IDLE2));
    assert_eq!(game.state(), GamePhase::Playing);
    assert_eq!(game.score().score_string(), "0 - 0");
}

#[test]
fn test_score_limit_match_runs_to_completion() {
    let mut game = classic(Score::new(0, 1));
    let goal_tick = shoot_at_blue_goal(&mut game);
    assert!((40..=50).contains(&goal_tick), "goal at tick {goal_tick}");
    assert_eq!((game.score().red, game.score().blue), (1, 0));
    assert_eq!(game.score().animation_timeout, 150);
    // Game over: the kickoff does not change hands
    assert_eq!(game.team_kickoff(), Team::Red);

    for _ in 0..149 {
        assert!(!game.step(&IDLE2));
        assert_eq!(game.state(), GamePhase::Goal);
    }
    assert!(!game.step(&IDLE2));
    assert_eq!(game.state(), GamePhase::End);
    assert_eq!(game.score().animation_timeout, 300);

    for _ in 0..299 {
        assert!(!game.step(&IDLE2));
    }
    assert!(game.step(&IDLE2));
    assert_eq!(game.score().winner(), Team::Red);
}

#[test]
fn test_time_limited_draw_never_ends() {
    let mut game = classic(Score::new(1, 0));
    game.ball_mut().velocity = DVec2::new(1.0, 0.0);
    for _ in 0..4000 {
        assert!(!game.step(&IDLE2));
    }
    assert_eq!(game.state(), GamePhase::Playing);
    assert!(game.score().time > 60.0);
    assert_eq!(game.score().score_string(), "0 - 0");
}

#[test]
fn test_time_limit_ends_with_a_leader() {
    let mut game = classic(Score::new(1, 0));
    shoot_at_blue_goal(&mut game);
    assert_eq!(game.team_kickoff(), Team::Blue);
    while game.state() == GamePhase::Goal {
        game.step(&IDLE2);
    }
    assert_eq!(game.state(), GamePhase::Kickoff);
    let blue = game.player_disc(game.players()[1].id).unwrap();
    assert_eq!(blue.c_mask, CollisionFlag::PLAYER_PLAYING | CollisionFlag::BLUEKO);

    game.ball_mut().velocity = DVec2::new(0.0, 1.0);
    let mut ended = false;
    for _ in 0..4000 {
        game.step(&IDLE2);
        if game.state() == GamePhase::End {
            ended = true;
            break;
        }
    }
    assert!(ended);
    assert!(game.score().time >= 60.0);
    assert_eq!(game.score().winner(), Team::Red);
}

#[test]
fn test_reset_restores_spawn_state() {
    let mut game = classic(Score::default());
    let spawn = game.discs().to_vec();
    for _ in 0..500 {
        game.step(&[Action::new(1, 1, true), Action::new(-1, -1, true)]);
    }
    assert_ne!(game.discs(), spawn.as_slice());

    game.reset(false).unwrap();
    assert_eq!(game.discs(), spawn.as_slice());
    assert_eq!(game.state(), GamePhase::Kickoff);
    assert_eq!(game.score().total_ticks, 0);
}

fn bot_match(ticks: usize) -> Game {
    let mut game = classic(Score::new(3, 3));
    let mut bots: Vec<Box<dyn Bot>> = vec![Box::new(ChaseBot::new()), Box::new(GoalkeeperBot::new(9))];
    for _ in 0..ticks {
        let actions = collect_actions(&mut bots, &game);
        if game.step(&actions) {
            break;
        }
        let ball = game.ball().position;
        assert!(ball.x.abs() <= 420.0 && ball.y.abs() <= 200.0, "ball escaped to {ball}");
    }
    game
}

#[test]
fn test_bot_match_is_deterministic() {
    let a = bot_match(2000);
    let b = bot_match(2000);
    assert_eq!(a.discs(), b.discs());
    assert_eq!(a.score(), b.score());
    assert!(a.players()[0].stats.touches > 0);
}
