use automata::GridCoord;
use automata::automaton::Automaton;
use automata::cell::State;
use automata::grid::Grid;
use automata::rule_set::B3S23;

const GLIDER: [(GridCoord, GridCoord); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

fn seeded(w: GridCoord, h: GridCoord, alive: &[(GridCoord, GridCoord)]) -> anyhow::Result<Grid> {
    let mut grid = Grid::new(w, h)?;
    for &(x, y) in alive {
        grid.set_cell(x, y, State::Alive);
    }
    Ok(grid)
}

#[test]
fn blinker_has_period_two() -> anyhow::Result<()> {
    let horizontal = seeded(5, 5, &[(1, 2), (2, 2), (3, 2)])?;
    let vertical = seeded(5, 5, &[(2, 1), (2, 2), (2, 3)])?;

    let mut grid = horizontal.clone();
    let mut automaton = Automaton::new(B3S23);

    automaton.step(&mut grid);
    assert_eq!(grid, vertical);

    automaton.step(&mut grid);
    assert_eq!(grid, horizontal);

    Ok(())
}

#[test]
fn glider_travels_around_the_torus() -> anyhow::Result<()> {
    let start = seeded(8, 8, &GLIDER)?;
    let mut grid = start.clone();
    let mut automaton = Automaton::default();

    // Four generations move the glider one cell down and to the right
    automaton.advance(&mut grid, 4);
    let shifted: Vec<_> = GLIDER.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
    assert_eq!(grid, seeded(8, 8, &shifted)?);

    // Crossing both edges brings it back where it started
    automaton.advance(&mut grid, 28);
    assert_eq!(grid, start);
    assert_eq!(automaton.generation(), 32);

    Ok(())
}

#[test]
fn population_is_conserved_by_still_lifes() -> anyhow::Result<()> {
    // A block split across all four corners of the torus
    let mut grid = seeded(6, 6, &[(0, 0), (5, 0), (0, 5), (5, 5)])?;
    let before = grid.clone();

    Automaton::default().advance(&mut grid, 10);

    assert_eq!(grid, before);
    assert_eq!(grid.population(), 4);

    Ok(())
}

#[test]
fn resize_between_steps() -> anyhow::Result<()> {
    let mut grid = seeded(8, 8, &GLIDER)?;
    let mut automaton = Automaton::default();

    automaton.advance(&mut grid, 4);
    grid.resize(20, 12)?;
    automaton.advance(&mut grid, 4);

    let shifted: Vec<_> = GLIDER.iter().map(|&(x, y)| (x + 2, y + 2)).collect();
    assert_eq!(grid, seeded(20, 12, &shifted)?);

    Ok(())
}

#[test]
fn failed_resize_keeps_the_simulation_going() -> anyhow::Result<()> {
    let mut grid = seeded(5, 5, &[(1, 2), (2, 2), (3, 2)])?;
    let mut automaton = Automaton::default();

    assert!(grid.resize(-1, 5).is_err());
    assert!(grid.resize(5, -1).is_err());

    automaton.step(&mut grid);
    assert_eq!(grid, seeded(5, 5, &[(2, 1), (2, 2), (2, 3)])?);

    Ok(())
}
