//! Shortest paths on a weighted grid with `KeyedQueue::decrease`.
//!
//! Run with: cargo run --example dijkstra

use pqkit::ds::KeyedQueue;

const WIDTH: usize = 8;
const HEIGHT: usize = 6;

/// Cost of entering each cell.
fn cost(x: usize, y: usize) -> u32 {
    (((x * 7 + y * 13) ^ (x * y)) % 9 + 1) as u32
}

fn neighbours(node: usize) -> impl Iterator<Item = usize> {
    let (x, y) = (node % WIDTH, node / WIDTH);
    let mut out = Vec::with_capacity(4);
    if x > 0 {
        out.push(node - 1);
    }
    if x + 1 < WIDTH {
        out.push(node + 1);
    }
    if y > 0 {
        out.push(node - WIDTH);
    }
    if y + 1 < HEIGHT {
        out.push(node + WIDTH);
    }
    out.into_iter()
}

fn shortest_paths(source: usize) -> (Vec<Option<u32>>, Vec<Option<usize>>) {
    let cells = WIDTH * HEIGHT;
    let mut dist = vec![None; cells];
    let mut parent = vec![None; cells];
    let mut frontier: KeyedQueue<usize, u32> = KeyedQueue::with_capacity(cells);
    frontier.push(source, 0);

    while let Some((node, d)) = frontier.pop() {
        dist[node] = Some(d);
        for next in neighbours(node) {
            if dist[next].is_some() {
                continue;
            }
            let candidate = d + cost(next % WIDTH, next / WIDTH);
            if frontier.decrease(next, candidate) {
                parent[next] = Some(node);
            }
        }
    }
    (dist, parent)
}

fn main() {
    let source = 0;
    let target = WIDTH * HEIGHT - 1;
    let (dist, parent) = shortest_paths(source);

    println!("=== Grid costs ===");
    for y in 0..HEIGHT {
        let row: Vec<String> = (0..WIDTH).map(|x| cost(x, y).to_string()).collect();
        println!("   {}", row.join(" "));
    }

    println!("\n=== Distances from (0,0) ===");
    for y in 0..HEIGHT {
        let row: Vec<String> = (0..WIDTH)
            .map(|x| match dist[y * WIDTH + x] {
                Some(d) => format!("{:>3}", d),
                None => "  -".to_string(),
            })
            .collect();
        println!("   {}", row.join(" "));
    }

    let mut path = vec![target];
    let mut node = target;
    while let Some(prev) = parent[node] {
        path.push(prev);
        node = prev;
    }
    path.reverse();
    let steps: Vec<String> = path
        .iter()
        .map(|n| format!("({},{})", n % WIDTH, n / WIDTH))
        .collect();
    println!("\nPath to ({},{}): {}", target % WIDTH, target / WIDTH, steps.join(" -> "));
    if let Some(total) = dist[target] {
        println!("Total cost: {}", total);
    }
}
