//! Per-frame painter
//!
//! Outlines every polygon and, in the same pass, measures the upper point and
//! hands it back to the game for the next tick.

use glam::Vec2;

use super::{Color, Renderer, palette};
use crate::physics::{BodyRole, PhysicsWorld, SceneBuilder};
use crate::sim::{Game, GamePhase, HudView, ScoreDisplay, UpperPointScan};

const INTRO_LINES: &[(&str, f32)] = &[
    ("Keep the tower unstable as long as you can by using your", 150.0),
    ("mouse to move the base of it.", 160.0),
    ("The higher the tower and the longer it remains unstable,", 180.0),
    ("the more points you get.", 190.0),
    ("What score will you be able to reach?", 210.0),
];

/// Paint one frame and record the measured upper point
pub fn render_frame<B, R>(game: &mut Game<B>, out: &mut R)
where
    B: SceneBuilder,
    R: Renderer + ?Sized,
{
    out.clear(palette::BACKGROUND);

    let (width, height) = (game.settings().screen_width, game.settings().screen_height);
    let hud = game.hud();

    if hud.phase == GamePhase::Intro {
        draw_intro(out, width, height);
        return;
    }

    draw_ruler(out, width, hud.baseline);

    let frozen = hud.stable || hud.lost;
    let mut scan = UpperPointScan::new(width, height);
    game.world().for_each_polygon(&mut |role, verts| {
        let color = match (frozen, role) {
            (true, _) => palette::FROZEN,
            (false, BodyRole::Platform) => palette::PLATFORM,
            (false, BodyRole::Box) => palette::BOX,
        };
        draw_outline(&mut *out, verts, color);
        scan.observe(verts);
    });
    game.record_upper_point(scan.upper_point());

    let upper_line = game.hud().upper_line;
    out.draw_line(
        Vec2::new(0.0, upper_line),
        Vec2::new(width, upper_line),
        palette::UPPER_LINE,
    );

    draw_scores(out, &hud);
    draw_verdict(out, &hud, width, height);
}

fn draw_intro<R: Renderer + ?Sized>(out: &mut R, width: f32, height: f32) {
    out.draw_text("Stay Unstable!", Vec2::new(width / 2.0 - 40.0, 70.0), palette::TEXT);
    for (line, y) in INTRO_LINES {
        out.draw_text(line, Vec2::new(10.0, *y), palette::TEXT);
    }
    out.draw_text(
        "At any time, press escape to quit.",
        Vec2::new(10.0, height - 70.0),
        palette::TEXT,
    );
    out.draw_text(
        "Press enter to start.",
        Vec2::new(width - 130.0, height - 20.0),
        palette::TEXT,
    );
}

/// Vertical height scale: ticks every 50 units, labels every 100
fn draw_ruler<R: Renderer + ?Sized>(out: &mut R, width: f32, baseline: f32) {
    let x = width - 15.0;
    out.draw_line(Vec2::new(x, 0.0), Vec2::new(x, baseline), palette::RULER);

    let foot = baseline as i32;
    for y in 0..=foot {
        let above = foot - y;
        if above % 50 == 0 {
            let y = y as f32;
            out.draw_line(
                Vec2::new(width - 10.0, y),
                Vec2::new(width - 20.0, y),
                palette::RULER,
            );
        }
        if above % 100 == 0 && above != 0 {
            out.draw_text(
                &above.to_string(),
                Vec2::new(width - 25.0, y as f32 - 8.0),
                palette::TEXT,
            );
        }
    }
}

fn draw_outline<R: Renderer + ?Sized>(out: &mut R, verts: &[Vec2], color: Color) {
    let Some(&last) = verts.last() else {
        return;
    };
    let mut prev = last;
    for &v in verts {
        out.draw_line(prev, v, color);
        prev = v;
    }
}

fn score_text(label: &str, score: ScoreDisplay) -> String {
    match score {
        ScoreDisplay::Value(v) => format!("{label}{v}"),
        ScoreDisplay::Max => format!("{label}MAXSCORE"),
    }
}

fn draw_scores<R: Renderer + ?Sized>(out: &mut R, hud: &HudView) {
    out.draw_text(&score_text("Record ", hud.best), Vec2::new(10.0, 10.0), palette::TEXT);
    out.draw_text(&score_text("Score  ", hud.score), Vec2::new(10.0, 20.0), palette::TEXT);
}

fn draw_verdict<R: Renderer + ?Sized>(out: &mut R, hud: &HudView, width: f32, height: f32) {
    let (headline, offset) = if hud.stable {
        ("Stable.", 20.0)
    } else if hud.lost {
        ("No more objects.", 45.0)
    } else {
        return;
    };

    let mid = height / 2.0;
    out.draw_text(headline, Vec2::new(width / 2.0 - offset, mid), palette::TEXT);
    out.draw_text("You lose.", Vec2::new(width / 2.0 - 25.0, mid + 10.0), palette::TEXT);
    out.draw_text(
        "Press enter to restart.",
        Vec2::new(110.0, mid + 40.0),
        palette::TEXT,
    );
}
