/*!
Escape-time Mandelbrot kernels on two kinds of numbers: native `f64` and the
arbitrary-precision [`big_float::BigFloat`].

The kernel is written once against [`numeric::Scalar`] and instantiated per
number type:

```
use mandelbrot_bench::{big_float::BigFloat, config::{Config, Mode}, grid::{self, Output}};

let config = Config::default().with_size(8, 8).with_mode(Mode::Materialize);
let native = grid::render::<f64>(&config).unwrap();
let precise = grid::render::<BigFloat>(&config).unwrap();
if let (Output::Frame(native), Output::Frame(precise)) = (native, precise) {
    assert_eq!(native.iterations(), precise.iterations());
}
```
*/

pub mod big_float;
pub mod colour;
pub mod config;
pub mod escape;
pub mod grid;
pub mod histogram;
pub mod mapper;
pub mod numeric;
pub mod pixel;
pub mod screen;
