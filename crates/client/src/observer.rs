//! Headless observer that renders battle output as text or JSON.

use std::io::Write;

use anyhow::Result;
use battle_core::Outcome;
use battle_runtime::{BattleSnapshot, CombatNotice, CombatantView, LifecycleEvent};

use crate::config::OutputFormat;

/// Writes one line per combat event and a summary per finished battle.
pub struct TextObserver<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TextObserver<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// First line of a round: the opening log entry and both combatants.
    pub fn started(&mut self, round: u32, snapshot: &BattleSnapshot) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        let opening = snapshot.log.last().map(String::as_str).unwrap_or_default();
        writeln!(self.out, "== Round {round} ==")?;
        writeln!(self.out, "{opening}")?;
        writeln!(
            self.out,
            "   {}",
            render_status(&snapshot.player, &snapshot.enemy)
        )?;
        Ok(())
    }

    /// One log line plus health as the action left it.
    pub fn combat(&mut self, notice: &CombatNotice) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{}", notice.line)?;
                writeln!(
                    self.out,
                    "   {}",
                    render_status(&notice.player, &notice.enemy)
                )?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, notice)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    pub fn finished(&mut self, epoch: u64, outcome: Outcome) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{outcome}")?,
            OutputFormat::Json => {
                let event = LifecycleEvent::BattleEnded { epoch, outcome };
                serde_json::to_writer(&mut self.out, &event)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// `Player 86/100 [BLOCK] | Slime 97/110`
pub fn render_status(player: &CombatantView, enemy: &CombatantView) -> String {
    format!("{} | {}", render_combatant(player), render_combatant(enemy))
}

fn render_combatant(view: &CombatantView) -> String {
    let mut out = format!("{} {}/{}", view.name, view.current_health, view.max_health);
    if view.blocking {
        out.push_str(" [BLOCK]");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CombatEvent, Resolution, Side, SkillKind};

    fn view(name: &str, hp: u32, max: u32, blocking: bool) -> CombatantView {
        CombatantView {
            name: name.into(),
            current_health: hp,
            max_health: max,
            blocking,
            hit: false,
            healed: false,
        }
    }

    fn snapshot() -> BattleSnapshot {
        BattleSnapshot {
            player: view("Player", 86, 100, true),
            enemy: view("Slime", 97, 110, false),
            log: vec!["A wild Slime appears! Battle starts.".into()],
            game_over: false,
            outcome: None,
            running: true,
        }
    }

    fn heal_notice() -> CombatNotice {
        CombatNotice {
            epoch: 1,
            resolution: Resolution {
                actor: Side::Player,
                kind: SkillKind::Heal,
                event: CombatEvent::Heal {
                    target: "Player".into(),
                    amount: 18,
                },
                ended: None,
            },
            line: "Player heals 18 HP".into(),
            player: view("Player", 68, 100, false),
            enemy: view("Slime", 97, 110, false),
        }
    }

    #[test]
    fn test_render_status_marks_blocking() {
        let snapshot = snapshot();
        assert_eq!(
            render_status(&snapshot.player, &snapshot.enemy),
            "Player 86/100 [BLOCK] | Slime 97/110"
        );
    }

    #[test]
    fn test_text_combat_output_uses_notice_health() {
        let mut observer = TextObserver::new(Vec::new(), OutputFormat::Text);
        observer.combat(&heal_notice()).unwrap();
        observer.finished(1, Outcome::Victory).unwrap();

        let text = String::from_utf8(observer.into_inner()).unwrap();
        assert_eq!(
            text,
            "Player heals 18 HP\n   Player 68/100 | Slime 97/110\nYou Win!\n"
        );
    }

    #[test]
    fn test_json_output_is_one_object_per_line() {
        let mut observer = TextObserver::new(Vec::new(), OutputFormat::Json);
        observer.started(1, &snapshot()).unwrap();
        observer.combat(&heal_notice()).unwrap();
        observer.finished(1, Outcome::Defeat).unwrap();

        let text = String::from_utf8(observer.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let notice: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(notice["line"], "Player heals 18 HP");
        assert_eq!(notice["player"]["current_health"], 68);

        let ended: LifecycleEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(
            ended,
            LifecycleEvent::BattleEnded {
                epoch: 1,
                outcome: Outcome::Defeat
            }
        );
    }
}
