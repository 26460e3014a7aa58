//! Match outcome validation and orientation
//!
//! Raw submissions arrive as blue/red sides with scores. Everything here
//! rejects invalid input and produces a canonical winner/loser pair, so
//! no rating mutation is ever attempted against an invalid match.

use crate::error::LeagueError;
use crate::types::PlayerId;

/// A validated 1v1 outcome, oriented as winner/loser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoloMatchup {
    pub winner: PlayerId,
    pub loser: PlayerId,
}

/// A validated 2v2 outcome, oriented as winning/losing team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamMatchup {
    pub winners: [PlayerId; 2],
    pub losers: [PlayerId; 2],
}

fn invalid(reason: &str) -> anyhow::Error {
    LeagueError::InvalidMatch {
        reason: reason.to_string(),
    }
    .into()
}

/// Validate and orient a solo match
pub fn orient_solo(
    blue: PlayerId,
    red: PlayerId,
    blue_score: u32,
    red_score: u32,
) -> crate::error::Result<SoloMatchup> {
    if blue == red {
        return Err(invalid("a player cannot face themselves"));
    }
    if blue_score == red_score {
        return Err(invalid("tied scores are not allowed"));
    }

    if blue_score > red_score {
        Ok(SoloMatchup {
            winner: blue,
            loser: red,
        })
    } else {
        Ok(SoloMatchup {
            winner: red,
            loser: blue,
        })
    }
}

/// Validate and orient a team match
pub fn orient_team(
    blue: [PlayerId; 2],
    red: [PlayerId; 2],
    blue_score: u32,
    red_score: u32,
) -> crate::error::Result<TeamMatchup> {
    let all = [blue[0], blue[1], red[0], red[1]];
    for i in 0..all.len() {
        for j in (i + 1)..all.len() {
            if all[i] == all[j] {
                return Err(invalid("all four players must be distinct"));
            }
        }
    }
    if blue_score == red_score {
        return Err(invalid("tied scores are not allowed"));
    }

    if blue_score > red_score {
        Ok(TeamMatchup {
            winners: blue,
            losers: red,
        })
    } else {
        Ok(TeamMatchup {
            winners: red,
            losers: blue,
        })
    }
}
