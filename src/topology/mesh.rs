use quantifiable_derive::Quantifiable;//the derive macro

use crate::match_object;
use crate::routing::{PortDirection,TopologyExtents};
use crate::error::*;
use super::{Topology,Link,TopologyBuilderArgument};

/**
A mesh of up to three dimensions. The router `(x,y,z)` has index `x + columns*(y + rows*z)`.
East/West links change `x`, North/South change `y`, and Up/Down change `z`. North and Up go towards greater coordinates.

```ignore
Mesh{
	rows: 4,
	columns: 4,
	depths: 1,//optional, defaults to 1
	x_weight: 1,//optional weights of the links in each dimension
	y_weight: 2,
	z_weight: 3,
}
```
**/
#[derive(Debug,Quantifiable)]
pub struct Mesh
{
	rows: usize,
	columns: usize,
	depths: usize,
	x_weight: i32,
	y_weight: i32,
	z_weight: i32,
}

impl Topology for Mesh
{
	fn num_routers(&self) -> usize
	{
		self.rows*self.columns*self.depths
	}
	fn extents(&self) -> TopologyExtents
	{
		TopologyExtents{
			rows: self.rows,
			columns: self.columns,
			depths: self.depths,
			routers: self.num_routers(),
		}
	}
	fn links(&self, router:usize) -> Vec<Link>
	{
		use PortDirection::*;
		let [x,y,z] = self.extents().cube_coordinates(router);
		let (x,y,z) = (x as usize, y as usize, z as usize);
		let layer = self.rows*self.columns;
		let mut links = Vec::with_capacity(6);
		let mut push = |direction:PortDirection, neighbour:usize, weight:i32| links.push(Link{ direction, neighbour, weight });
		if x+1<self.columns { push(East,router+1,self.x_weight); }
		if x>0 { push(West,router-1,self.x_weight); }
		if y+1<self.rows { push(North,router+self.columns,self.y_weight); }
		if y>0 { push(South,router-self.columns,self.y_weight); }
		if z+1<self.depths { push(Up,router+layer,self.z_weight); }
		if z>0 { push(Down,router-layer,self.z_weight); }
		links
	}
}

impl Mesh
{
	pub fn new(arg:TopologyBuilderArgument) -> Result<Mesh,Error>
	{
		let mut rows=None;
		let mut columns=None;
		let mut depths=1;
		let mut x_weight=1;
		let mut y_weight=2;
		let mut z_weight=3;
		match_object!(arg.cv,"Mesh",value,
			"rows" => rows=Some(value.as_usize()?),
			"columns" => columns=Some(value.as_usize()?),
			"depths" => depths=value.as_usize()?,
			"x_weight" => x_weight=value.as_i32()?,
			"y_weight" => y_weight=value.as_i32()?,
			"z_weight" => z_weight=value.as_i32()?,
		);
		let rows=rows.ok_or_else(||arg.cv.ill("There were no rows"))?;
		let columns=columns.ok_or_else(||arg.cv.ill("There were no columns"))?;
		if rows==0 || columns==0 || depths==0
		{
			return Err(arg.cv.ill("A mesh needs at least one router in each dimension"));
		}
		if x_weight<1 || y_weight<1 || z_weight<1
		{
			return Err(arg.cv.ill("Link weights must be positive"));
		}
		Ok(Mesh{
			rows,
			columns,
			depths,
			x_weight,
			y_weight,
			z_weight,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Plugs;
	use crate::config_parser::ConfigurationValue;

	fn mesh(rows:usize, columns:usize, depths:usize) -> Mesh
	{
		let cv = ConfigurationValue::Object("Mesh".to_string(),vec![
			("rows".to_string(),ConfigurationValue::Number(rows as f64)),
			("columns".to_string(),ConfigurationValue::Number(columns as f64)),
			("depths".to_string(),ConfigurationValue::Number(depths as f64)),
		]);
		let plugs = Plugs::default();
		Mesh::new(TopologyBuilderArgument{cv:&cv,plugs:&plugs}).expect("valid mesh")
	}

	#[test]
	fn neighbours()
	{
		use PortDirection::*;
		let topology = mesh(2,3,2);
		assert_eq!(topology.num_routers(),12);
		//Router 4 is (1,1,0).
		let links:Vec<(PortDirection,usize,i32)> = topology.links(4).iter().map(|l|(l.direction,l.neighbour,l.weight)).collect();
		assert_eq!(links,vec![(East,5,1),(West,3,1),(South,1,2),(Up,10,3)]);
		//Router 11 is (2,1,1).
		let links:Vec<(PortDirection,usize)> = topology.links(11).iter().map(|l|(l.direction,l.neighbour)).collect();
		assert_eq!(links,vec![(West,10),(South,8),(Down,5)]);
		for router in 0..topology.num_routers()
		{
			for link in topology.links(router)
			{
				let back = topology.links(link.neighbour);
				assert!(back.iter().any(|b|b.neighbour==router && b.direction==link.direction.opposite()));
			}
		}
	}

	#[test]
	fn rejects_empty_dimensions()
	{
		let plugs = Plugs::default();
		let cv = ConfigurationValue::Object("Mesh".to_string(),vec![
			("rows".to_string(),ConfigurationValue::Number(0.0)),
			("columns".to_string(),ConfigurationValue::Number(3.0)),
		]);
		assert!(Mesh::new(TopologyBuilderArgument{cv:&cv,plugs:&plugs}).is_err());
		let cv = ConfigurationValue::Object("Mesh".to_string(),vec![
			("columns".to_string(),ConfigurationValue::Number(3.0)),
		]);
		assert!(Mesh::new(TopologyBuilderArgument{cv:&cv,plugs:&plugs}).is_err());
	}
}
